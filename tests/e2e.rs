//! End-to-end tests for edgequake-textlab.
//!
//! The first half drives the public API with in-process mock collaborators:
//! no network, no pdfium, no API key. The second half makes live LLM calls
//! and is gated behind the `E2E_ENABLED` environment variable.
//!
//! Run the live tests with:
//!   E2E_ENABLED=1 OPENAI_API_KEY=sk-... cargo test --test e2e -- --nocapture

use async_trait::async_trait;
use edgequake_textlab::{
    detect_primary_speaker, is_dialogue, Augmented, Augmenter, Collaborators, Document,
    DocxReader, LanguageDetector, OcrEngine, PageSeparator, Palette, PdfTextReader, Session,
    Summarizer, TargetLanguage, TextLab, TextLabConfig, TextLabError, TransformMode,
    TransformProgressCallback, Translator, UNKNOWN_SPEAKER,
};
use edgequake_textlab::pipeline::docx::DocxRsReader;
use image::DynamicImage;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

// ── Mock collaborators ───────────────────────────────────────────────────────

/// Records every collaborator call in order.
#[derive(Default)]
struct Journal(Mutex<Vec<String>>);

impl Journal {
    fn log(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }
    fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
    fn count(&self, prefix: &str) -> usize {
        self.entries().iter().filter(|e| e.starts_with(prefix)).count()
    }
}

struct Mock {
    journal: Arc<Journal>,
    pages: Vec<&'static str>,
    language: Option<&'static str>,
    augmented: Augmented,
    fail_summarize: bool,
}

impl Mock {
    fn new(journal: Arc<Journal>) -> Self {
        Self {
            journal,
            pages: vec!["ab", "cd"],
            language: Some("en"),
            augmented: Augmented::Fragments(vec!["a".into(), "b".into(), "c".into()]),
            fail_summarize: false,
        }
    }
}

impl PdfTextReader for Mock {
    fn pages_of(&self, _bytes: &[u8]) -> Result<Vec<String>, TextLabError> {
        self.journal.log("pdf");
        Ok(self.pages.iter().map(|p| p.to_string()).collect())
    }
}

#[async_trait]
impl OcrEngine for Mock {
    async fn image_to_text(&self, image: &DynamicImage) -> Result<String, TextLabError> {
        self.journal.log(format!("ocr {}x{}", image.width(), image.height()));
        Ok("INVOICE 42\n".to_string())
    }
}

#[async_trait]
impl LanguageDetector for Mock {
    async fn detect(&self, text: &str) -> Result<String, TextLabError> {
        self.journal.log(format!("detect {text}"));
        self.language
            .map(str::to_string)
            .ok_or_else(|| TextLabError::DetectionFailure {
                detail: "detector answered \"unknown\"".into(),
            })
    }
}

#[async_trait]
impl Translator for Mock {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TextLabError> {
        self.journal
            .log(format!("translate {source_lang}->{target_lang} {text}"));
        Ok(format!("<{target_lang}>{text}"))
    }
}

#[async_trait]
impl Summarizer for Mock {
    async fn summarize(
        &self,
        text: &str,
        _max_length: Option<usize>,
    ) -> Result<String, TextLabError> {
        self.journal.log(format!("summarize {text}"));
        if self.fail_summarize {
            return Err(TextLabError::collaborator("summarize", "model overloaded"));
        }
        Ok("A short summary.".to_string())
    }
}

#[async_trait]
impl Augmenter for Mock {
    async fn augment(&self, text: &str) -> Result<Augmented, TextLabError> {
        self.journal.log(format!("augment {text}"));
        Ok(self.augmented.clone())
    }
}

fn collaborators(mock: Mock) -> Collaborators {
    let mock = Arc::new(mock);
    Collaborators {
        pdf: mock.clone(),
        ocr: mock.clone(),
        docx: Arc::new(DocxRsReader),
        detector: mock.clone(),
        translator: mock.clone(),
        summarizer: mock.clone(),
        augmenter: mock,
    }
}

fn lab_with(mock: Mock, config: TextLabConfig) -> TextLab {
    TextLab::with_collaborators(config, collaborators(mock))
}

fn lab(journal: &Arc<Journal>) -> TextLab {
    lab_with(Mock::new(journal.clone()), TextLabConfig::default())
}

fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let docx = paragraphs.iter().fold(docx_rs::Docx::new(), |docx, p| {
        docx.add_paragraph(
            docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text(*p)),
        )
    });
    let mut buf = Cursor::new(Vec::new());
    docx.build().pack(&mut buf).unwrap();
    buf.into_inner()
}

fn png_bytes() -> Vec<u8> {
    let img = DynamicImage::new_rgb8(8, 6);
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

// ── Heuristics ───────────────────────────────────────────────────────────────

#[test]
fn test_dialogue_markers() {
    for text in ["He said \"hi\"", "it's", "Q: why", "well-known", "-"] {
        assert!(is_dialogue(text), "{text:?} should be dialogue");
    }
    for text in ["", "Plain prose, with commas; and semicolons!", "no markers here?"] {
        assert!(!is_dialogue(text), "{text:?} should not be dialogue");
    }
}

#[test]
fn test_primary_speaker() {
    assert_eq!(detect_primary_speaker(""), UNKNOWN_SPEAKER);
    assert_eq!(detect_primary_speaker("hello world"), UNKNOWN_SPEAKER);
    assert_eq!(
        detect_primary_speaker("Alice said hello. Bob replied. Alice smiled."),
        "Alice"
    );
}

// ── Extraction ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_txt_upload_round_trips_exactly() {
    let journal = Arc::new(Journal::default());
    let lab = lab(&journal);
    let s = "Line one\r\n  indented ünïcödé\n\ttrailing  \n";
    let doc = Document::new("notes.txt", s.as_bytes().to_vec());
    assert_eq!(lab.extract(&doc).await.unwrap(), s);
    assert!(journal.entries().is_empty());
}

#[tokio::test]
async fn test_docx_upload_joins_paragraphs() {
    let journal = Arc::new(Journal::default());
    let lab = lab(&journal);
    let doc = Document::new("letter.DOCX", docx_bytes(&["Hello", "World"]));
    assert_eq!(lab.extract(&doc).await.unwrap(), "Hello\nWorld");
}

#[tokio::test]
async fn test_pdf_pages_glued_or_separated() {
    let journal = Arc::new(Journal::default());
    let glued = lab(&journal);
    let doc = Document::new("report.pdf", b"%PDF-1.7".to_vec());
    assert_eq!(glued.extract(&doc).await.unwrap(), "abcd");

    let config = TextLabConfig::builder()
        .page_separator(PageSeparator::Newline)
        .build()
        .unwrap();
    let separated = lab_with(Mock::new(journal.clone()), config);
    assert_eq!(separated.extract(&doc).await.unwrap(), "ab\ncd");
}

#[tokio::test]
async fn test_image_upload_goes_through_ocr() {
    let journal = Arc::new(Journal::default());
    let lab = lab(&journal);
    let doc = Document::new("scan.jpeg", png_bytes());
    assert_eq!(lab.extract(&doc).await.unwrap(), "INVOICE 42\n");
    assert_eq!(journal.entries(), vec!["ocr 8x6"]);
}

#[tokio::test]
async fn test_csv_upload_is_unsupported() {
    let journal = Arc::new(Journal::default());
    let lab = lab(&journal);
    let doc = Document::new("data.csv", b"a,b\n1,2\n".to_vec());
    match lab.extract(&doc).await {
        Err(TextLabError::UnsupportedFormat { format }) => assert_eq!(format, "csv"),
        other => panic!("expected UnsupportedFormat, got {other:?}"),
    }
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let journal = Arc::new(Journal::default());
    let config = TextLabConfig::builder().max_upload_bytes(4).build().unwrap();
    let lab = lab_with(Mock::new(journal.clone()), config);
    let doc = Document::new("big.txt", b"12345".to_vec());
    assert!(matches!(
        lab.extract(&doc).await,
        Err(TextLabError::InputTooLarge { size: 5, limit: 4, .. })
    ));
}

#[tokio::test]
async fn test_local_file_input() {
    let journal = Arc::new(Journal::default());
    let lab = lab(&journal);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memo.txt");
    std::fs::write(&path, "from disk").unwrap();

    let text = lab.extract_input(path.to_str().unwrap()).await.unwrap();
    assert_eq!(text, "from disk");

    let missing = dir.path().join("nope.txt");
    assert!(matches!(
        lab.extract_input(missing.to_str().unwrap()).await,
        Err(TextLabError::FileNotFound { .. })
    ));
}

// ── Transform ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_paraphrase_fragments_joined() {
    let journal = Arc::new(Journal::default());
    let mut lab = lab(&journal);
    let r = lab
        .transform(&TransformMode::Paraphrase, "The quick fox.")
        .await
        .unwrap();
    assert_eq!(&*r.text, "a b c");
}

#[tokio::test]
async fn test_summarize_twice_returns_cached_result() {
    let journal = Arc::new(Journal::default());
    let mut lab = lab(&journal);
    let text = "Alice: ready? Bob: yes. Alice: go.";

    let first = lab.transform(&TransformMode::Summarize, text).await.unwrap();
    let second = lab.transform(&TransformMode::Summarize, text).await.unwrap();

    assert_eq!(&*first.text, "A short summary.\n\nPrimary Speaker: Alice");
    assert!(Arc::ptr_eq(&first.text, &second.text));
    assert!(second.cached);
    assert_eq!(journal.count("summarize"), 1);

    lab.clear_cache();
    lab.transform(&TransformMode::Summarize, text).await.unwrap();
    assert_eq!(journal.count("summarize"), 2);
}

#[tokio::test]
async fn test_translate_flow_and_target_keys() {
    let journal = Arc::new(Journal::default());
    let mut lab = lab(&journal);
    let fr = TransformMode::Translate {
        target: TargetLanguage::French,
    };
    let zh = TransformMode::Translate {
        target: TargetLanguage::Chinese,
    };

    let r = lab.transform(&fr, "Good morning").await.unwrap();
    assert_eq!(&*r.text, "<fr>Good morning");
    assert_eq!(r.detected_language.as_deref(), Some("en"));
    assert_eq!(r.download_filename(), "translate_French.txt");

    let r = lab.transform(&zh, "Good morning").await.unwrap();
    assert_eq!(&*r.text, "<zh-CN>Good morning");
    assert_eq!(lab.cache().len(), 2);
    assert_eq!(
        journal.entries(),
        vec![
            "detect Good morning",
            "translate en->fr Good morning",
            "detect Good morning",
            "translate en->zh-CN Good morning",
        ]
    );
}

#[tokio::test]
async fn test_detection_failure_blocks_translation() {
    let journal = Arc::new(Journal::default());
    let mut mock = Mock::new(journal.clone());
    mock.language = None;
    let mut lab = lab_with(mock, TextLabConfig::default());

    let mode = TransformMode::Translate {
        target: TargetLanguage::Hindi,
    };
    let err = lab.transform(&mode, "%%% ###").await.unwrap_err();
    assert!(matches!(err, TextLabError::DetectionFailure { .. }));
    assert_eq!(journal.count("translate"), 0);
    assert!(lab.cache().is_empty());
}

#[tokio::test]
async fn test_collaborator_failure_is_not_cached() {
    let journal = Arc::new(Journal::default());
    let mut mock = Mock::new(journal.clone());
    mock.fail_summarize = true;
    let mut lab = lab_with(mock, TextLabConfig::default());

    for _ in 0..2 {
        let err = lab
            .transform(&TransformMode::Summarize, "text")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "summarize failed: model overloaded");
    }
    assert_eq!(journal.count("summarize"), 2);
}

#[tokio::test]
async fn test_save_writes_download_file() {
    let journal = Arc::new(Journal::default());
    let dir = tempfile::tempdir().unwrap();
    let config = TextLabConfig::builder()
        .output_dir(dir.path())
        .build()
        .unwrap();
    let mut lab = lab_with(Mock::new(journal), config);

    let r = lab
        .transform(&TransformMode::Paraphrase, "text")
        .await
        .unwrap();
    let path = lab.save(&r).await.unwrap();
    assert_eq!(path, dir.path().join("paraphrase.txt"));
    assert_eq!(std::fs::read_to_string(path).unwrap(), "a b c");
}

#[test]
fn test_sync_wrapper() {
    let journal = Arc::new(Journal::default());
    let mut lab = lab(&journal);
    let r = lab
        .transform_sync(&TransformMode::Paraphrase, "outside a runtime")
        .unwrap();
    assert_eq!(&*r.text, "a b c");
}

// ── Progress callback ────────────────────────────────────────────────────────

#[derive(Default)]
struct EventLog(Mutex<Vec<String>>);

impl TransformProgressCallback for EventLog {
    fn on_extraction_start(&self, filename: &str, format_tag: &str) {
        self.0.lock().unwrap().push(format!("extract {filename} {format_tag}"));
    }
    fn on_extraction_complete(&self, _filename: &str, chars: usize) {
        self.0.lock().unwrap().push(format!("extracted {chars}"));
    }
    fn on_transform_start(&self, mode: &str) {
        self.0.lock().unwrap().push(format!("start {mode}"));
    }
    fn on_transform_complete(&self, mode: &str, result_len: usize, cached: bool) {
        self.0
            .lock()
            .unwrap()
            .push(format!("done {mode} {result_len} {cached}"));
    }
    fn on_error(&self, stage: &str, _error: &str) {
        self.0.lock().unwrap().push(format!("error {stage}"));
    }
}

#[tokio::test]
async fn test_progress_events() {
    let journal = Arc::new(Journal::default());
    let events = Arc::new(EventLog::default());
    let config = TextLabConfig::builder()
        .progress_callback(events.clone() as Arc<dyn TransformProgressCallback>)
        .build()
        .unwrap();
    let mut lab = lab_with(Mock::new(journal), config);

    let text = lab
        .extract(&Document::new("a.txt", b"hello".to_vec()))
        .await
        .unwrap();
    lab.transform(&TransformMode::Paraphrase, &text).await.unwrap();
    lab.transform(&TransformMode::Paraphrase, &text).await.unwrap();
    let _ = lab.extract(&Document::new("a.csv", vec![])).await;

    assert_eq!(
        *events.0.lock().unwrap(),
        vec![
            "extract a.txt txt",
            "extracted 5",
            "start paraphrase",
            "done paraphrase 5 false",
            "start paraphrase",
            "done paraphrase 5 true",
            "extract a.csv csv",
            "error extract",
        ]
    );
}

#[test]
fn test_callback_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EventLog>();
    assert_send_sync::<edgequake_textlab::NoopProgressCallback>();
}

// ── Interactive session ──────────────────────────────────────────────────────

async fn run_session(lab: TextLab, script: &str) -> (String, TextLab) {
    let mut out = Vec::new();
    let input = Cursor::new(script.as_bytes());
    let mut session = Session::new(lab, input, &mut out, Palette { color: false });
    session.run().await.unwrap();
    let lab = session.into_lab();
    (String::from_utf8(out).unwrap(), lab)
}

#[tokio::test]
async fn test_session_summarize_typed_text_and_download() {
    let journal = Arc::new(Journal::default());
    let dir = tempfile::tempdir().unwrap();
    let config = TextLabConfig::builder().output_dir(dir.path()).build().unwrap();
    let lab = lab_with(Mock::new(journal.clone()), config);

    let script = "1\n1\nAlice: hi\nBob: hello Alice\n.\ny\nq\n";
    let (out, _) = run_session(lab, script).await;

    assert!(out.contains("Your Input Text\nAlice: hi\nBob: hello Alice"), "{out}");
    assert!(out.contains("Summary Result\nA short summary.\n\nPrimary Speaker: Alice"), "{out}");
    assert_eq!(
        std::fs::read_to_string(dir.path().join("summary.txt")).unwrap(),
        "A short summary.\n\nPrimary Speaker: Alice"
    );
}

#[tokio::test]
async fn test_session_translate_shows_detected_language() {
    let journal = Arc::new(Journal::default());
    let mut mock = Mock::new(journal.clone());
    mock.language = Some("fr");
    let lab = lab_with(mock, TextLabConfig::default());

    let script = "2\nBonjour\n.\nSpanish\nn\n";
    let (out, lab) = run_session(lab, script).await;

    assert!(out.contains("Detected language: French"), "{out}");
    assert!(out.contains("Translation Result\n<es>Bonjour"), "{out}");
    assert!(out.contains("Download result as translate_Spanish.txt?"), "{out}");
    assert_eq!(lab.cache().len(), 1);
}

#[tokio::test]
async fn test_session_reports_error_and_continues() {
    let journal = Arc::new(Journal::default());
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("table.csv");
    std::fs::write(&csv, "a,b").unwrap();
    let lab = lab(&journal);

    let script = format!("3\n2\n{}\n3\n1\nsome words\n.\nn\n", csv.display());
    let (out, _) = run_session(lab, &script).await;

    assert!(out.contains("pdf, png, jpg, jpeg, txt, csv, docx"), "{out}");
    assert!(out.contains("Unsupported file format 'csv'"), "{out}");
    assert!(out.contains("Paraphrase Result\na b c"), "{out}");
}

#[tokio::test]
async fn test_session_ends_on_eof() {
    let journal = Arc::new(Journal::default());
    let (out, _) = run_session(lab(&journal), "").await;
    assert!(out.contains("Select your choice"));
    assert!(journal.entries().is_empty());
}

// ── Live provider tests (E2E_ENABLED) ────────────────────────────────────────

/// Skip this test unless E2E_ENABLED is set.
macro_rules! e2e_skip_unless_enabled {
    () => {{
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
            return;
        }
    }};
}

#[tokio::test]
async fn test_live_summarize_dialogue() {
    e2e_skip_unless_enabled!();
    let mut lab = TextLab::from_config(TextLabConfig::default()).expect("provider configured");
    let text = "Maria: The quarterly numbers are in. Revenue grew by twelve percent.\n\
                Tom: That beats the forecast.\n\
                Maria: Marketing spend was flat, so margins improved as well.";
    let r = lab.transform(&TransformMode::Summarize, text).await.unwrap();
    println!("{}", r.text);
    assert!(r.text.ends_with("Primary Speaker: Maria"));
}

#[tokio::test]
async fn test_live_translate_to_french() {
    e2e_skip_unless_enabled!();
    let mut lab = TextLab::from_config(TextLabConfig::default()).expect("provider configured");
    let mode = TransformMode::Translate {
        target: TargetLanguage::French,
    };
    let r = lab.transform(&mode, "Good morning, how are you today?").await.unwrap();
    println!("{} -> {}", r.detected_language.as_deref().unwrap_or("?"), r.text);
    assert_eq!(r.detected_language.as_deref(), Some("en"));
    assert!(!r.text.trim().is_empty());
}

#[tokio::test]
async fn test_live_detection_rejects_symbols() {
    e2e_skip_unless_enabled!();
    let lab = TextLab::from_config(TextLabConfig::default()).expect("provider configured");
    assert!(matches!(
        lab.detect_language("1234 %%% ---").await,
        Err(TextLabError::DetectionFailure { .. })
    ));
}

#[tokio::test]
async fn test_live_paraphrase() {
    e2e_skip_unless_enabled!();
    let mut lab = TextLab::from_config(TextLabConfig::default()).expect("provider configured");
    let r = lab
        .transform(&TransformMode::Paraphrase, "The quick brown fox jumps over the lazy dog.")
        .await
        .unwrap();
    println!("{}", r.text);
    assert!(!r.text.trim().is_empty());
}
