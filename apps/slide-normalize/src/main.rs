use argh::FromArgs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use slidenorm::filename::derive_output_path;
use slidenorm::image::{Image, ImageSize};
use slidenorm::imgproc::{core::hconcat, interpolation::InterpolationMode, resize::resize_native};
use slidenorm::normalize::{normalize_file, ClaheParams};

const PREVIEW_SIZE: ImageSize = ImageSize {
    width: 512,
    height: 512,
};

#[derive(FromArgs)]
/// Normalize the contrast of a slide tile by applying CLAHE (Contrast Limited Adaptive
/// Histogram Equalization) to its lightness channel.
struct Args {
    /// the image tile to process
    #[argh(option, short = 'f')]
    file: PathBuf,

    /// the output filename extension of the normalized tile
    #[argh(option, short = 'e')]
    ext: Option<String>,

    /// the output filename (default: insert .normalized before .tile.tissue.png)
    #[argh(option, short = 'o')]
    out: Option<PathBuf>,

    /// show the original and normalized tiles side by side
    #[argh(switch, short = 's')]
    show: bool,
}

impl Args {
    fn output_path(&self) -> PathBuf {
        derive_output_path(&self.file, self.ext.as_deref(), self.out.as_deref())
    }
}

/// True if both paths name the same file, lexically or after resolving links.
fn is_same_file(input: &Path, output: &Path) -> bool {
    if input == output {
        return true;
    }
    match (input.canonicalize(), output.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn show_preview(
    original: &Image<u8, 3>,
    normalized: &Image<u8, 3>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut original_small = Image::<u8, 3>::from_size_val(PREVIEW_SIZE, 0)?;
    resize_native(original, &mut original_small, InterpolationMode::Bilinear)?;

    let mut normalized_small = Image::<u8, 3>::from_size_val(PREVIEW_SIZE, 0)?;
    resize_native(normalized, &mut normalized_small, InterpolationMode::Bilinear)?;

    let mut side_by_side = Image::<u8, 3>::from_size_val(
        ImageSize {
            width: 2 * PREVIEW_SIZE.width,
            height: PREVIEW_SIZE.height,
        },
        0,
    )?;
    hconcat(&original_small, &normalized_small, &mut side_by_side)?;

    // create a Rerun recording stream
    let rec = rerun::RecordingStreamBuilder::new("slide-normalize").spawn()?;
    log::info!("logging preview of {} to rerun", original.size());

    for (name, image) in [
        ("preview/original", &original_small),
        ("preview/normalized", &normalized_small),
        ("preview/side_by_side", &side_by_side),
    ] {
        rec.log(
            name,
            &rerun::Image::from_elements(
                image.as_slice(),
                image.size().into(),
                rerun::ColorModel::RGB,
            ),
        )?;
    }

    println!("  preview: press enter to exit..");
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();
    let out = args.output_path();

    if !args.file.exists() {
        eprintln!("Could not find input file {:?}", args.file);
        std::process::exit(1);
    }

    if is_same_file(&args.file, &out) {
        eprintln!(
            "Refusing to overwrite input file with output file {:?}",
            args.file
        );
        std::process::exit(1);
    }

    println!("Running slide-normalize");
    eprintln!("  input    {}", args.file.display());
    eprintln!("  outfile  {}", out.display());

    let params = ClaheParams::default();
    log::debug!("clahe params: {params:?}");

    let tic = Instant::now();
    let result = normalize_file(&args.file, &out, &params)?;
    println!("  done (took {:.2}s)", tic.elapsed().as_secs_f64());

    if args.show {
        show_preview(&result.original, &result.normalized)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        match Args::from_args(&["slide-normalize"], args) {
            Ok(args) => args,
            Err(early_exit) => panic!("failed to parse {args:?}: {}", early_exit.output),
        }
    }

    #[test]
    fn test_parse_args() {
        let args = parse(&["-f", "input", "-e", "ext"]);
        assert_eq!(args.output_path(), PathBuf::from("input.ext"));

        let args = parse(&["-f", "input.png", "-e", "ext"]);
        assert_eq!(args.output_path(), PathBuf::from("input.ext"));

        let args = parse(&["-f", "x0.y0.tile.tissue.png"]);
        assert_eq!(
            args.output_path(),
            PathBuf::from("x0.y0.normalized.tile.tissue.png")
        );
        assert!(!args.show);
    }

    #[test]
    fn test_parse_long_args() {
        let args = parse(&["--file", "a.png", "--out", "b.png", "--show"]);
        assert_eq!(args.output_path(), PathBuf::from("b.png"));
        assert!(args.show);
    }

    #[test]
    fn test_file_is_required() {
        assert!(Args::from_args(&["slide-normalize"], &["-e", "png"]).is_err());
    }

    #[test]
    fn test_is_same_file() {
        assert!(is_same_file(Path::new("a.png"), Path::new("a.png")));
        assert!(!is_same_file(
            Path::new("missing/a.png"),
            Path::new("missing/b.png")
        ));
    }
}
