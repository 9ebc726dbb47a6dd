use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use slidenorm_image::Image;
use slidenorm_imgproc::enhance::{clahe, ClaheParams};

fn bench_clahe(c: &mut Criterion) {
    let mut group = c.benchmark_group("Clahe");

    for (width, height) in [(256, 224), (512, 512), (1024, 1024), (1000, 999)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image_data = (0..width * height)
            .map(|_| rand::random::<u8>())
            .collect::<Vec<_>>();
        let image = Image::<u8, 1>::new([*width, *height].into(), image_data).unwrap();
        let output = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();

        for grid in [(8, 8), (16, 16)] {
            let params = ClaheParams {
                grid_size: grid,
                ..Default::default()
            };

            group.bench_with_input(
                BenchmarkId::new(format!("grid_{}x{}", grid.0, grid.1), &parameter_string),
                &(&image, &output),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| black_box(clahe(src, &mut dst, &params)))
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_clahe);
criterion_main!(benches);
