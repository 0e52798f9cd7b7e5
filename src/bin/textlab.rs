//! CLI binary for edgequake-textlab.
//!
//! Without `--mode` it starts the interactive session; with `--mode` it runs
//! one transform over `--text`, `--file` or stdin and prints the result.

use anyhow::{bail, Context, Result};
use clap::Parser;
use edgequake_textlab::{
    PageSeparator, Palette, ProgressCallback, Session, TargetLanguage, TextLab, TextLabConfig,
    TransformMode, TransformProgressCallback, TranslationBackend,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Spinner on stderr while a document is extracted or a collaborator runs.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style =
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Preparing");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl TransformProgressCallback for CliProgressCallback {
    fn on_extraction_start(&self, filename: &str, format_tag: &str) {
        self.bar.set_prefix("Extracting");
        self.bar.set_message(format!("{filename} ({format_tag})"));
    }

    fn on_extraction_complete(&self, filename: &str, chars: usize) {
        self.bar.println(format!(
            "  {} {}  {}",
            green("✓"),
            filename,
            dim(&format!("{chars} chars"))
        ));
    }

    fn on_transform_start(&self, mode: &str) {
        self.bar.set_prefix("Running");
        self.bar.set_message(mode.to_string());
    }

    fn on_transform_complete(&self, mode: &str, result_len: usize, cached: bool) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {}  {}{}",
            green("✔"),
            bold(mode),
            dim(&format!("{result_len} chars")),
            if cached { dim("  (cached)") } else { String::new() }
        );
    }

    fn on_error(&self, stage: &str, error: &str) {
        self.bar.finish_and_clear();
        // Truncate very long error messages to keep output tidy.
        let msg = match error.char_indices().nth(120) {
            Some((idx, _)) => format!("{}\u{2026}", &error[..idx]),
            None => error.to_string(),
        };
        eprintln!("{} {}  {}", red("✗"), bold(stage), red(&msg));
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Interactive session (menu: Summarize / Translate / Paraphrase)
  textlab

  # Summarize a PDF
  textlab --mode summarize --file report.pdf

  # Translate typed text to French and save translate_French.txt
  textlab --mode translate --target French --text "Good morning" --download

  # Paraphrase text piped on stdin, JSON output
  cat notes.txt | textlab --mode paraphrase --json

  # OCR a scanned page, then summarize it
  textlab --mode summarize --file https://example.com/scan.png

  # Translate with the Google web endpoint instead of the LLM
  textlab --mode translate --target Hindi --translator google --file letter.docx

UPLOAD FORMATS:
  pdf           text layer via pdfium (pages glued unless --page-separator)
  png jpg jpeg  OCR via the vision model
  txt           UTF-8
  docx          body paragraphs, one per line

TARGET LANGUAGES:
  English Telugu Hindi Urdu Arabic French Spanish Tamil Chinese

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY          OpenAI API key
  ANTHROPIC_API_KEY       Anthropic API key
  GEMINI_API_KEY          Google Gemini API key
  EDGEQUAKE_LLM_PROVIDER  Override provider (openai, anthropic, gemini, ollama)
  EDGEQUAKE_MODEL         Override model ID
  PDFIUM_LIB_PATH         Directory containing libpdfium
  TEXTLAB_*               Every flag, e.g. TEXTLAB_TARGET=French
"#;

/// Summarize, translate and paraphrase text and documents with LLMs.
#[derive(Parser, Debug)]
#[command(
    name = "textlab",
    version,
    about = "Summarize, translate and paraphrase text and documents with LLMs",
    long_about = "Summarize, translate or paraphrase typed text, or text extracted from PDF, \
image (OCR), TXT and DOCX uploads. Runs an interactive menu when no --mode is given.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Run one transform and exit. Omit for the interactive session.
    #[arg(long, env = "TEXTLAB_MODE", value_enum)]
    mode: Option<ModeArg>,

    /// Input text.
    #[arg(long, env = "TEXTLAB_TEXT", conflicts_with = "file")]
    text: Option<String>,

    /// Local file path or HTTP/HTTPS URL to extract text from.
    #[arg(long, env = "TEXTLAB_FILE")]
    file: Option<String>,

    /// Target language for --mode translate (name or code).
    #[arg(long, env = "TEXTLAB_TARGET", default_value = "English", value_parser = parse_target)]
    target: TargetLanguage,

    /// Directory for downloaded result files.
    #[arg(long, env = "TEXTLAB_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Also write the result to summary.txt / translate_<Language>.txt / paraphrase.txt.
    #[arg(long, env = "TEXTLAB_DOWNLOAD")]
    download: bool,

    /// Print the result as JSON instead of plain text.
    #[arg(long, env = "TEXTLAB_JSON")]
    json: bool,

    /// Translation backend.
    #[arg(long, env = "TEXTLAB_TRANSLATOR", value_enum, default_value = "llm")]
    translator: TranslatorArg,

    /// LLM provider: openai, anthropic, gemini, ollama, azure.
    #[arg(long, env = "TEXTLAB_PROVIDER")]
    provider: Option<String>,

    /// LLM model ID (e.g. gpt-4.1-nano, gpt-4.1-mini).
    #[arg(long, env = "TEXTLAB_MODEL")]
    model: Option<String>,

    /// PDF page separator: none, newline, or a custom string (`\n` is unescaped).
    #[arg(long, env = "TEXTLAB_PAGE_SEPARATOR", default_value = "none")]
    page_separator: String,

    /// Summary length hint in words.
    #[arg(long, env = "TEXTLAB_SUMMARY_MAX_LENGTH")]
    summary_max_length: Option<usize>,

    /// Max LLM output tokens per call.
    #[arg(long, env = "TEXTLAB_MAX_TOKENS", default_value_t = 2048)]
    max_tokens: usize,

    /// LLM temperature (0.0–2.0).
    #[arg(long, env = "TEXTLAB_TEMPERATURE", default_value_t = 0.3)]
    temperature: f32,

    /// Per-call LLM timeout in seconds.
    #[arg(long, env = "TEXTLAB_API_TIMEOUT", default_value_t = 60)]
    api_timeout: u64,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "TEXTLAB_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,

    /// Disable the progress spinner.
    #[arg(long, env = "TEXTLAB_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "TEXTLAB_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the result.
    #[arg(short, long, env = "TEXTLAB_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Summarize,
    Translate,
    Paraphrase,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum TranslatorArg {
    Llm,
    Google,
}

impl From<TranslatorArg> for TranslationBackend {
    fn from(v: TranslatorArg) -> Self {
        match v {
            TranslatorArg::Llm => TranslationBackend::Llm,
            TranslatorArg::Google => TranslationBackend::GoogleWeb,
        }
    }
}

fn parse_target(s: &str) -> Result<TargetLanguage, String> {
    s.parse()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let interactive = cli.mode.is_none();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner and the session menu carry the user-facing feedback;
    // library INFO logs would interleave with them.
    let show_progress = !interactive && !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress || interactive {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn TransformProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;
    let mut lab = TextLab::from_config(config).context("Failed to set up collaborators")?;

    let Some(mode) = cli.mode else {
        let stdout = io::stdout();
        let palette = Palette {
            color: stdout.is_terminal(),
        };
        let mut session = Session::new(lab, io::stdin().lock(), stdout.lock(), palette);
        session.run().await.context("Terminal I/O failed")?;
        return Ok(());
    };

    // ── One-shot transform ───────────────────────────────────────────────
    let text = match (&cli.text, &cli.file) {
        (Some(text), _) => text.clone(),
        (None, Some(file)) => lab
            .extract_input(file)
            .await
            .with_context(|| format!("Failed to extract text from '{file}'"))?,
        (None, None) => read_stdin()?,
    };

    let mode = match mode {
        ModeArg::Summarize => TransformMode::Summarize,
        ModeArg::Translate => TransformMode::Translate { target: cli.target },
        ModeArg::Paraphrase => TransformMode::Paraphrase,
    };

    let result = lab
        .transform(&mode, &text)
        .await
        .with_context(|| format!("Failed to {mode}"))?;

    if cli.json {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialise result")?;
        println!("{json}");
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(result.text.as_bytes())
            .context("Failed to write to stdout")?;
        // Ensure a trailing newline on stdout.
        if !result.text.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
    }

    if cli.download {
        let path = lab.save(&result).await.context("Failed to save result")?;
        if !cli.quiet {
            eprintln!("{}  →  {}", green("✔"), bold(&path.display().to_string()));
        }
    }

    Ok(())
}

fn read_stdin() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        bail!("No input: pass --text, --file, or pipe text on stdin");
    }
    let mut text = String::new();
    stdin
        .lock()
        .read_to_string(&mut text)
        .context("Failed to read stdin as UTF-8")?;
    Ok(text)
}

/// Map CLI args to `TextLabConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<TextLabConfig> {
    let mut builder = TextLabConfig::builder()
        .temperature(cli.temperature)
        .max_tokens(cli.max_tokens)
        .api_timeout_secs(cli.api_timeout)
        .download_timeout_secs(cli.download_timeout)
        .translation_backend(cli.translator.into())
        .page_separator(parse_separator(&cli.page_separator))
        .output_dir(&cli.output_dir);

    if let Some(words) = cli.summary_max_length {
        builder = builder.summary_max_length(words);
    }
    if let Some(ref model) = cli.model {
        builder = builder.model(model);
    }
    if let Some(ref provider) = cli.provider {
        builder = builder.provider_name(provider);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Parse `--page-separator` into `PageSeparator`.
fn parse_separator(s: &str) -> PageSeparator {
    match s.to_lowercase().as_str() {
        "none" | "" => PageSeparator::None,
        "newline" | "nl" | "\\n" => PageSeparator::Newline,
        _ => PageSeparator::Custom(s.replace("\\n", "\n")),
    }
}
