//! wordshot - render styled text to PNG images

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use log::info;

use wordshot::config::Config;
use wordshot::export::{ExportRequest, ExportResult, ExportSettings, Exporter, Renderer};
use wordshot::raster::CellSurface;
use wordshot::{preview, words, Result, WordshotError};

/// Options collected from the command line
#[derive(Debug, Default, PartialEq)]
struct Options {
    text: String,
    rules: Option<PathBuf>,
    words: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    color: Option<String>,
    background: Option<String>,
    weight: Option<String>,
    sort: bool,
    preview: bool,
    save_config: bool,
}

#[derive(Debug, PartialEq)]
enum Action {
    Help,
    Version,
    Export(Options),
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args)? {
        Action::Help => {
            print_usage();
            return Ok(());
        }
        Action::Version => {
            print_version();
            return Ok(());
        }
        Action::Export(options) => options,
    };

    let mut config = Config::load();
    if let Some(color) = &options.color {
        config.style = config.style.with_color(color);
    }
    if let Some(background) = &options.background {
        config.style = config.style.with_background(background);
    }
    if let Some(weight) = &options.weight {
        config.style = config.style.with_weight(weight);
    }
    config.sort_words |= options.sort;

    if options.save_config {
        let path = config.save()?;
        println!("Saved settings to {}", path.display());
    }

    let rules = options.rules.as_ref().map(fs::read_to_string).transpose()?;
    let terms = match &options.words {
        Some(path) => load_words(path, &config)?,
        None => Vec::new(),
    };

    if options.preview {
        let renderer = Renderer::from_document(config.style.clone(), rules.as_deref());
        preview::write_runs(&mut io::stdout(), &renderer.render(&options.text))?;
        return Ok(());
    }

    let settings = ExportSettings::from_config(&config)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async {
        let mut exporter = Exporter::new(settings);
        let cancel = exporter.cancellation();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });

        let mut surface = CellSurface::new();
        let request = ExportRequest {
            template: &options.text,
            rules: rules.as_deref(),
            terms: &terms,
            base_style: &config.style,
        };
        exporter.export(&mut surface, request).await
    })?;

    let out_dir = options.out_dir.unwrap_or_else(|| PathBuf::from("."));
    let path = write_output(&out_dir, &result)?;
    report(&result, &path);
    Ok(())
}

/// Read and normalize a word list file
fn load_words(path: &Path, config: &Config) -> Result<Vec<String>> {
    let raw = fs::read(path)?;
    let mut terms = words::normalize_bytes(&raw, config.delimiter)?;
    if config.sort_words {
        terms.sort();
    }
    info!("Loaded {} words from {}", terms.len(), path.display());
    Ok(terms)
}

/// Save an export result into `dir`
fn write_output(dir: &Path, result: &ExportResult) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(result.file_name());
    fs::write(&path, result.bytes())?;
    Ok(path)
}

fn report(result: &ExportResult, path: &Path) {
    match result {
        ExportResult::Single { .. } => println!("Wrote {}", path.display()),
        ExportResult::Archive(report) => {
            println!("Wrote {} images to {}", report.entries.len(), path.display());
            for failure in &report.failures {
                eprintln!("  skipped {}: {}", failure.key, failure.error);
            }
            if report.cancelled {
                eprintln!("  export was cancelled; archive is partial");
            }
        }
    }
}

fn parse_args(args: &[String]) -> Result<Action> {
    let mut options = Options::default();
    let mut text: Option<String> = None;
    let mut iter = args.iter();

    let usage = |msg: String| WordshotError::Usage(msg);

    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| usage(format!("{} requires a value", name)))
        };

        let flag = arg.as_str();
        match flag {
            "--help" | "-h" => return Ok(Action::Help),
            "--version" | "-V" => return Ok(Action::Version),
            "--rules" | "-r" => options.rules = Some(PathBuf::from(value(flag)?)),
            "--words" | "-w" => options.words = Some(PathBuf::from(value(flag)?)),
            "--out" | "-o" => options.out_dir = Some(PathBuf::from(value(flag)?)),
            "--color" => options.color = Some(value(flag)?),
            "--background" => options.background = Some(value(flag)?),
            "--weight" => options.weight = Some(value(flag)?),
            "--sort" => options.sort = true,
            "--preview" => options.preview = true,
            "--save-config" => options.save_config = true,
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(usage(format!("unknown option: {}", other)));
            }
            other => {
                if text.is_some() {
                    return Err(usage("only one TEXT argument is allowed".to_string()));
                }
                text = Some(other.to_string());
            }
        }
    }

    options.text = text.ok_or_else(|| usage("missing TEXT argument".to_string()))?;
    Ok(Action::Export(options))
}

fn print_usage() {
    println!("wordshot {} - render styled text to PNG images", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: wordshot [OPTIONS] <TEXT>");
    println!();
    println!("Options:");
    println!("  -r, --rules FILE   Style-rule document (YAML)");
    println!("  -w, --words FILE   Word list; TEXT containing !{{word}} yields one image per word");
    println!("  -o, --out DIR      Output directory (default: current directory)");
    println!("      --color C      Base text colour");
    println!("      --background C Base background colour");
    println!("      --weight W     Base font weight");
    println!("      --sort         Sort the word list");
    println!("      --preview      Print the styled text to the terminal instead");
    println!("      --save-config  Write the effective settings to ~/.wordshot.toml");
    println!("  -h, --help         Show this help message");
    println!("  -V, --version      Show version information");
    println!();
    println!("Settings are read from ~/.wordshot.toml. Set RUST_LOG=debug for details.");
}

fn print_version() {
    println!("wordshot {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordshot::archive::ArchiveEntry;
    use wordshot::export::BatchReport;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_export() {
        let action = parse_args(&args(&[
            "-r", "style.yaml", "--words", "list.words", "--sort", "Hello !{word}!",
        ]))
        .unwrap();

        let Action::Export(options) = action else {
            panic!("expected export");
        };
        assert_eq!(options.text, "Hello !{word}!");
        assert_eq!(options.rules, Some(PathBuf::from("style.yaml")));
        assert_eq!(options.words, Some(PathBuf::from("list.words")));
        assert!(options.sort);
        assert!(!options.preview);
        assert!(!options.save_config);
    }

    #[test]
    fn test_parse_style_overrides() {
        let action = parse_args(&args(&[
            "--color", "red", "--background", "#fff", "--save-config", "hi",
        ]))
        .unwrap();

        let Action::Export(options) = action else {
            panic!("expected export");
        };
        assert_eq!(options.color.as_deref(), Some("red"));
        assert_eq!(options.background.as_deref(), Some("#fff"));
        assert!(options.save_config);
        assert_eq!(options.text, "hi");
    }

    #[test]
    fn test_parse_help_and_errors() {
        assert_eq!(parse_args(&args(&["--help"])).unwrap(), Action::Help);
        assert_eq!(parse_args(&args(&["-V"])).unwrap(), Action::Version);
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["--rules"])).is_err());
        assert!(parse_args(&args(&["--bogus", "x"])).is_err());
        assert!(parse_args(&args(&["one", "two"])).is_err());
    }

    #[test]
    fn test_write_output() {
        let dir = tempfile::tempdir().unwrap();
        let result = ExportResult::Archive(BatchReport {
            name: "content_images.zip".to_string(),
            entries: vec![ArchiveEntry::new("a", vec![1])],
            archive: vec![9, 9, 9],
            failures: Vec::new(),
            cancelled: false,
        });

        let path = write_output(&dir.path().join("out"), &result).unwrap();
        assert_eq!(path.file_name().unwrap(), "content_images.zip");
        assert_eq!(fs::read(path).unwrap(), vec![9, 9, 9]);
    }

    #[test]
    fn test_load_words() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.words");
        fs::write(&path, "zeta, Émile, alpha").unwrap();

        let mut config = Config::default();
        assert_eq!(load_words(&path, &config).unwrap(), vec!["zeta", "Emile", "alpha"]);

        config.sort_words = true;
        assert_eq!(load_words(&path, &config).unwrap(), vec!["Emile", "alpha", "zeta"]);
    }
}
