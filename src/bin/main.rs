use anyhow::{anyhow, Context, Result};
use blobkit::blob::{self, Blob};
use blobkit::data_uri::DataUri;
use blobkit::download;
use blobkit::host::NativeHost;

use std::{
    fs,
    path::{Path, PathBuf},
    process::exit,
};

use clap::{Parser, Subcommand};
use log::{error, warn, LevelFilter};
use simple_logger::{set_up_color_terminal, SimpleLogger};

#[derive(Debug, Parser, Clone)]
#[command(name = "blobkit", about = "Build, convert and download typed payloads")]
struct Cli {
    /// Directory downloads are written to
    #[arg(long, global = true, default_value = ".")]
    out_dir: PathBuf,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand, Clone)]
enum Command {
    /// Saves text as a text/plain download
    Text { text: String, name: String },

    /// Saves a JSON object or array as an application/json download
    Json { json: String, name: String },

    /// Saves a JSON array of numbers as an application/octet-stream download
    Binary { numbers: String, name: String },

    /// Decodes a data uri and saves its payload
    Decode {
        uri: String,
        name: String,
        /// Type to tag the payload with instead of the declared one
        #[arg(long)]
        mime: Option<String>,
        /// Treat the uri as an image (the payload is saved as image/png)
        #[arg(long)]
        image: bool,
    },

    /// Prints size, type and timestamp of a file
    Info {
        path: PathBuf,
        #[arg(long)]
        mime: Option<String>,
    },

    /// Prints a file as a data uri
    Encode {
        path: PathBuf,
        #[arg(long)]
        mime: Option<String>,
    },

    /// Prints a text/* file
    ReadText {
        path: PathBuf,
        #[arg(long, default_value = blob::TEXT_PLAIN)]
        mime: String,
    },

    /// Pretty-prints an application/json file
    ReadJson { path: PathBuf },

    /// Re-encodes an image at the given quality and saves the result
    Compress {
        path: PathBuf,
        #[arg(short, long, default_value_t = blob::DEFAULT_QUALITY)]
        quality: f32,
        /// Download name, defaults to "compressed-<input file name>"
        #[arg(long)]
        name: Option<String>,
    },

    /// Fetches a url and saves the response body
    Fetch {
        url: String,
        name: String,
        mime: String,
    },
}

fn init_logger(verbose: bool) -> Result<()> {
    set_up_color_terminal();
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let logger = SimpleLogger::new()
        .without_timestamps()
        .with_level(level)
        .env();
    let max_level = logger.max_level();

    log::set_max_level(max_level);
    log::set_boxed_logger(Box::new(logger))?;
    Ok(())
}

/// guesses a type from the file extension
fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "txt" => "text/plain",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => blob::OCTET_STREAM,
    }
}

fn read_blob(path: &Path, mime: Option<&str>) -> Result<Blob> {
    let data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let mime = mime.unwrap_or_else(|| mime_for_path(path));
    Ok(Blob::new(data, mime))
}

fn save(host: &NativeHost, blob: &Blob, name: &str) -> Result<()> {
    download::create_and_download_blob(host, blob.data(), name, blob.mime())?;
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let host = NativeHost::new(cli.out_dir);

    match cli.command {
        Command::Text { text, name } => save(&host, &blob::create_text_blob(&text)?, &name),
        Command::Json { json, name } => {
            let value: serde_json::Value =
                serde_json::from_str(&json).context("argument is not valid JSON")?;
            save(&host, &blob::create_json_blob(&value)?, &name)
        }
        Command::Binary { numbers, name } => {
            let value: serde_json::Value =
                serde_json::from_str(&numbers).context("argument is not valid JSON")?;
            save(&host, &blob::create_binary_blob_from_numbers(&value)?, &name)
        }
        Command::Decode {
            uri,
            name,
            mime,
            image,
        } => {
            let blob = if image {
                blob::create_image_blob(&uri)?
            } else {
                let mime = match mime {
                    Some(mime) => mime,
                    None => DataUri::parse(&uri)?.mime,
                };
                blob::base64_to_blob(&uri, &mime)?
            };
            save(&host, &blob, &name)
        }
        Command::Info { path, mime } => {
            let blob = read_blob(&path, mime.as_deref())?;
            let meta = blob::get_blob_metadata(&blob);
            println!("{}", serde_json::to_string_pretty(&meta)?);
            Ok(())
        }
        Command::Encode { path, mime } => {
            let blob = read_blob(&path, mime.as_deref())?;
            println!("{}", blob::blob_to_base64(&host, &blob)?);
            Ok(())
        }
        Command::ReadText { path, mime } => {
            let blob = read_blob(&path, Some(mime.as_str()))?;
            print!("{}", blob::blob_to_text(&host, &blob)?);
            Ok(())
        }
        Command::ReadJson { path } => {
            let blob = read_blob(&path, Some(blob::APPLICATION_JSON))?;
            let value: serde_json::Value = blob::blob_to_json(&host, &blob)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Command::Compress {
            path,
            quality,
            name,
        } => {
            let blob = read_blob(&path, None)?;
            let name = match name {
                Some(name) => name,
                None => path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| format!("compressed-{}", n))
                    .ok_or_else(|| anyhow!("cannot derive a download name from {:?}", path))?,
            };
            match blob::compress_blob(&host, &blob, quality)? {
                Some(compressed) => save(&host, &compressed, &name),
                None => {
                    warn!("no output for {} at quality {}", blob.mime(), quality);
                    Ok(())
                }
            }
        }
        Command::Fetch { url, name, mime } => {
            download::fetch_and_download_blob(&host, &url, &name, &mime)?;
            Ok(())
        }
    }
}

fn main() {
    let args = Cli::parse();

    if let Err(err) = init_logger(args.verbose) {
        eprintln!("failed to set up logging: {}", err);
    }

    if let Err(err) = run(args) {
        error!("{:#}", err);
        exit(1)
    }
}
