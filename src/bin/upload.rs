//! Command-line front end for the upload widget: sends one audio file to a
//! running backend and prints the transcription and summary.

use audio_notes_backend::client::{
    DisplayRegion, FilePicker, Notifier, UploadClient, UploadWidget,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "upload",
    about = "Upload an audio file and print its transcription and summary"
)]
struct Args {
    /// Base URL of the backend
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    server: String,

    /// Audio file to upload
    file: PathBuf,
}

/// On the command line the "file dialog" is the argument list.
struct ArgPicker(PathBuf);

impl FilePicker for ArgPicker {
    fn pick_file(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

struct StdoutRegion;

impl DisplayRegion for StdoutRegion {
    fn set_text(&self, text: &str) {
        println!("{text}");
    }
}

struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "audio_notes_backend=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut widget = UploadWidget::new(
        UploadClient::new(args.server),
        Box::new(ArgPicker(args.file)),
        Box::new(StdoutRegion),
        Box::new(StdoutRegion),
        Box::new(StderrNotifier),
    );

    widget.trigger_selection().await;
}
