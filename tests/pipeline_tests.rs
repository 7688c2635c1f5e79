use dwkit::engine::ArchiveNaming;
use dwkit::pipeline::{
    CancelToken, StructuredDocument, TaskOutcome, WorkerPool, decompress, delete_documents,
    find_archives, find_documents,
};
use dwkit::{
    ArchivePath, Category, Dataset, DocumentPath, DwkitError, ExtractionStrategy, Pipeline,
    PipelineConfig, PipelineState, WebDataCorpus, extract_corpus,
};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default();
    for (name, body) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

fn label_doc(title: &str, sentences: &[&str]) -> String {
    let content: Vec<String> = sentences
        .iter()
        .map(|s| format!(r#"{{"sentence":"{s}"}}"#))
        .collect();
    format!(
        r#"{{"named_entity":[{{"title":[{{"sentence":"{title}"}}],"content":[{}]}}]}}"#,
        content.join(",")
    )
}

fn config(root: &Path, work: &Path) -> PipelineConfig {
    let mut config = PipelineConfig::new(root, work.join("out").join("corpus.txt"));
    config.temp_root = work.join("temp");
    config
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn json_files_under(dir: &Path) -> usize {
    if !dir.exists() {
        return 0;
    }
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|x| x == "json"))
        .count()
}

/// Two label archives in nested directories plus a source archive that must be ignored.
fn web_corpus_fixture(root: &Path) {
    write_zip(
        &root.join("news").join("TL1.zip"),
        &[
            ("a/doc_1.json", &*label_doc("뉴스 제목", &["첫 문장", "둘째 (이름) 문장"])),
            ("a/doc_2.json", &*label_doc("(이름) 기자", &["셋째 문장"])),
            ("__MACOSX/a/._doc_1.json", "binary junk"),
        ],
    );
    write_zip(
        &root.join("blog").join("VL1.zip"),
        &[("doc_3.json", &*label_doc("블로그", &["넷째 문장"]))],
    );
    write_zip(
        &root.join("blog").join("VS1.zip"),
        &[("doc_4.json", r#"{"SJML":{"text":[{"title":"원천","content":"본문"}]}}"#)],
    );
}

// --- Worker pool ---

#[test]
fn test_pool_every_task_yields_one_outcome() {
    let documents: Vec<DocumentPath> = (0..50)
        .map(|i| DocumentPath::new(format!("doc_{i}.json"), None))
        .collect();
    let pool = WorkerPool::with_workers(4);
    let mut seen = BTreeSet::new();
    let report = pool.run(
        &documents,
        &CancelToken::new(),
        |d| Ok(d.path.clone()),
        |outcome| match outcome {
            TaskOutcome::Completed { output, .. } => assert!(seen.insert(output)),
            TaskOutcome::Failed { .. } => panic!("no task should fail"),
        },
    );
    assert_eq!(report.submitted, 50);
    assert_eq!(report.completed, 50);
    assert_eq!(seen.len(), 50);
}

#[test]
fn test_pool_failures_and_panics_stay_local() {
    let documents: Vec<DocumentPath> = (0..20)
        .map(|i| DocumentPath::new(format!("{i}"), None))
        .collect();
    let pool = WorkerPool::with_workers(3);
    let mut failed = Vec::new();
    let report = pool.run(
        &documents,
        &CancelToken::new(),
        |d| {
            let n: usize = d.path.to_str().unwrap().parse().unwrap();
            match n % 5 {
                0 => panic!("boom {n}"),
                1 => Err(DwkitError::malformed(format!("bad {n}"))),
                _ => Ok(n),
            }
        },
        |outcome| {
            if let TaskOutcome::Failed { error, .. } = outcome {
                failed.push(error);
            }
        },
    );
    assert_eq!(report.completed + report.failed, 20);
    assert_eq!(report.failed, 8);
    assert_eq!(
        failed
            .iter()
            .filter(|e| matches!(e, DwkitError::TaskPanicked(_)))
            .count(),
        4
    );
}

#[test]
fn test_pool_cancelled_before_start_submits_nothing() {
    let documents = vec![DocumentPath::new("a.json", None)];
    let cancel = CancelToken::new();
    cancel.cancel();
    let mut outcomes = 0;
    let report = WorkerPool::with_workers(2).run(
        &documents,
        &cancel,
        |_| Ok(()),
        |_| outcomes += 1,
    );
    assert_eq!(report.submitted, 0);
    assert_eq!(outcomes, 0);
}

#[test]
fn test_pool_empty_input() {
    let report = WorkerPool::with_workers(2).run(
        &[],
        &CancelToken::new(),
        |_| Ok(()),
        |_: TaskOutcome<()>| panic!("no outcome expected"),
    );
    assert_eq!(report.submitted, 0);
}

#[test]
fn test_pool_cancel_mid_run_discards_queued_documents() {
    let documents: Vec<DocumentPath> = (0..50)
        .map(|i| DocumentPath::new(format!("doc_{i}.json"), None))
        .collect();
    let cancel = CancelToken::new();
    let ran = AtomicUsize::new(0);
    let mut outcomes = 0;
    let report = WorkerPool::with_workers(1).run(
        &documents,
        &cancel,
        |_| {
            if ran.fetch_add(1, Ordering::SeqCst) == 0 {
                // Give the feeder time to fill the queue.
                thread::sleep(Duration::from_millis(200));
                cancel.cancel();
            }
            Ok(())
        },
        |_| outcomes += 1,
    );
    assert_eq!(ran.load(Ordering::SeqCst), 1);
    assert_eq!(report.submitted, 1);
    assert_eq!(report.completed, 1);
    assert_eq!(outcomes, 1);
}

// --- Locators and decompressor ---

#[test]
fn test_find_archives_sorted_and_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    web_corpus_fixture(dir.path());
    let naming = ArchiveNaming::split(Category::Label);
    let first = find_archives(dir.path(), naming, Category::Label).unwrap();
    let second = find_archives(dir.path(), naming, Category::Label).unwrap();
    let names: Vec<String> = first.iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["VL1.zip", "TL1.zip"]);
    assert_eq!(
        first.iter().map(|a| &a.path).collect::<Vec<_>>(),
        second.iter().map(|a| &a.path).collect::<Vec<_>>()
    );

    let source = find_archives(dir.path(), ArchiveNaming::split(Category::Source), Category::Source)
        .unwrap();
    assert_eq!(source.len(), 1);
    assert_eq!(source[0].category, Category::Source);
}

#[test]
fn test_find_archives_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(matches!(
        find_archives(&missing, ArchiveNaming::AnyZip, Category::Label),
        Err(DwkitError::RootNotFound(_))
    ));
}

#[test]
fn test_decompress_reports_progress_and_filters_documents() {
    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("TL1.zip");
    write_zip(
        &archive_path,
        &[
            ("x/one.json", "{}"),
            ("x/two.JSON", "{}"),
            ("x/readme.txt", "hello"),
            ("__MACOSX/x/._one.json", "junk"),
        ],
    );
    let dest = dir.path().join("out");
    fs::create_dir(&dest).unwrap();
    let mut last = (0, 0);
    let stats = decompress(
        &ArchivePath::new(&archive_path, Category::Label),
        &dest,
        |done, total| last = (done, total),
    )
    .unwrap();
    assert_eq!(stats.bytes, last.1);
    assert_eq!(last.0, last.1);
    assert!(dest.join("x").join("readme.txt").exists());

    let owner: std::sync::Arc<Path> = std::sync::Arc::from(archive_path.as_path());
    let documents = find_documents(&dest, Some(owner));
    assert_eq!(documents.len(), 2);
    assert!(documents.iter().all(|d| d.from_decompression()));
    assert_eq!(delete_documents(&documents), 2);
    assert_eq!(json_files_under(&dest.join("x")), 0);
}

#[test]
fn test_decompress_corrupt_archive() {
    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("TL1.zip");
    fs::write(&archive_path, b"PK\x03\x04 not really a zip").unwrap();
    let dest = dir.path().join("out");
    fs::create_dir(&dest).unwrap();
    let result = decompress(&ArchivePath::new(&archive_path, Category::Label), &dest, |_, _| {});
    assert!(matches!(result, Err(DwkitError::ArchiveCorrupt { .. })));
}

#[test]
fn test_delete_documents_keeps_source_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.json");
    fs::write(&path, "{}").unwrap();
    assert_eq!(delete_documents(&[DocumentPath::new(&path, None)]), 0);
    assert!(path.exists());
}

// --- End to end ---

#[test]
fn test_web_corpus_label_end_to_end() {
    let data = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();
    web_corpus_fixture(data.path());
    let config = config(data.path(), work.path());
    let output = config.output.clone();

    let summary = extract_corpus(config, Dataset::WebDataCorpus, &CancelToken::new()).unwrap();
    assert_eq!(summary.archives_found, 2);
    assert_eq!(summary.archives_processed, 2);
    assert_eq!(summary.documents_found, 3);
    assert_eq!(summary.documents_extracted, 3);
    assert_eq!(summary.documents_skipped(), 0);
    assert_eq!(summary.lines_written, 5);

    let lines: BTreeSet<String> = read_lines(&output).into_iter().collect();
    let expected: BTreeSet<String> = ["뉴스 제목", "첫 문장", "셋째 문장", "블로그", "넷째 문장"]
        .into_iter()
        .map(str::to_string)
        .collect();
    assert_eq!(lines, expected);

    // Scratch space is gone and the source archives are untouched.
    assert_eq!(json_files_under(&work.path().join("temp")), 0);
    assert_eq!(fs::read_dir(work.path().join("temp")).unwrap().count(), 0);
    assert!(data.path().join("news").join("TL1.zip").exists());
}

#[test]
fn test_lines_of_one_document_stay_contiguous() {
    let data = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();
    let entries: Vec<(String, String)> = (0..30)
        .map(|i| {
            let s1 = format!("d{i}-1");
            let s2 = format!("d{i}-2");
            (
                format!("doc_{i}.json"),
                label_doc(&format!("d{i}-0"), &[&s1, &s2]),
            )
        })
        .collect();
    let refs: Vec<(&str, &str)> = entries
        .iter()
        .map(|(n, b)| (n.as_str(), b.as_str()))
        .collect();
    write_zip(&data.path().join("TL1.zip"), &refs);

    let mut config = config(data.path(), work.path());
    config.num_workers = Some(4);
    let output = config.output.clone();
    extract_corpus(config, Dataset::WebDataCorpus, &CancelToken::new()).unwrap();

    let lines = read_lines(&output);
    assert_eq!(lines.len(), 90);
    for chunk in lines.chunks(3) {
        let prefix = chunk[0].strip_suffix("-0").unwrap();
        assert_eq!(chunk[1], format!("{prefix}-1"));
        assert_eq!(chunk[2], format!("{prefix}-2"));
    }
}

#[test]
fn test_web_corpus_source_end_to_end() {
    let data = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();
    web_corpus_fixture(data.path());
    let mut config = config(data.path(), work.path());
    config.category = Category::Source;
    let output = config.output.clone();

    let summary = extract_corpus(config, Dataset::WebDataCorpus, &CancelToken::new()).unwrap();
    assert_eq!(summary.archives_processed, 1);
    assert_eq!(read_lines(&output), vec!["원천", "본문"]);
}

#[test]
fn test_korean_sns_end_to_end() {
    let data = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();
    write_zip(
        &data.path().join("dialogues_01.zip"),
        &[(
            "talk.json",
            r##"{"data":[{"body":[{"utterance":"안녕"},{"utterance":"#@이름# 반가워"},{"utterance":"잘 지내?"}]}]}"##,
        )],
    );
    let config = config(data.path(), work.path());
    let output = config.output.clone();

    let summary = extract_corpus(config, Dataset::KoreanSns, &CancelToken::new()).unwrap();
    assert_eq!(summary.archives_found, 1);
    assert_eq!(read_lines(&output), vec!["안녕", "잘 지내?"]);
}

#[test]
fn test_korean_sns_source_rejected_before_any_io() {
    let data = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();
    let mut config = config(data.path(), work.path());
    config.category = Category::Source;
    let output = config.output.clone();

    let result = Pipeline::new(config, Dataset::KoreanSns);
    assert!(matches!(
        result,
        Err(DwkitError::UnsupportedTarget {
            category: Category::Source,
            ..
        })
    ));
    assert!(!output.exists());
    assert!(!work.path().join("temp").exists());
}

#[test]
fn test_missing_root_fails() {
    let work = tempfile::tempdir().unwrap();
    let config = config(&work.path().join("no_such_root"), work.path());
    assert!(matches!(
        extract_corpus(config, Dataset::WebDataCorpus, &CancelToken::new()),
        Err(DwkitError::RootNotFound(_))
    ));
}

#[test]
fn test_corrupt_archive_is_skipped() {
    let data = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();
    write_zip(
        &data.path().join("a_TL1.zip"),
        &[("one.json", &*label_doc("하나", &[]))],
    );
    fs::write(data.path().join("b_TL1.zip"), b"garbage").unwrap();
    write_zip(
        &data.path().join("c_TL1.zip"),
        &[("three.json", &*label_doc("셋", &[]))],
    );
    let config = config(data.path(), work.path());
    let output = config.output.clone();

    let summary = extract_corpus(config, Dataset::WebDataCorpus, &CancelToken::new()).unwrap();
    assert_eq!(summary.archives_found, 3);
    assert_eq!(summary.archives_processed, 2);
    assert_eq!(summary.failed_archives.len(), 1);
    assert!(summary.failed_archives[0].path.ends_with("b_TL1.zip"));
    assert_eq!(read_lines(&output), vec!["하나", "셋"]);
    assert_eq!(fs::read_dir(work.path().join("temp")).unwrap().count(), 0);
}

#[test]
fn test_malformed_document_skipped_and_counted() {
    let data = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();
    write_zip(
        &data.path().join("TL1.zip"),
        &[
            ("good.json", &*label_doc("좋은 문서", &["본문"])),
            ("broken.json", "{ not json"),
            ("empty_title.json", r#"{"named_entity":[{"title":[],"content":[]}]}"#),
        ],
    );
    let config = config(data.path(), work.path());
    let output = config.output.clone();

    let summary = extract_corpus(config, Dataset::WebDataCorpus, &CancelToken::new()).unwrap();
    assert_eq!(summary.documents_found, 3);
    assert_eq!(summary.documents_extracted, 1);
    assert_eq!(summary.documents_skipped(), 2);
    assert!(
        summary
            .skipped_documents
            .iter()
            .all(|s| s.archive.as_deref().is_some_and(|a| a.ends_with("TL1.zip")))
    );
    assert_eq!(read_lines(&output), vec!["좋은 문서", "본문"]);
}

#[test]
fn test_strict_mode_aborts_and_cleans_up() {
    let data = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();
    write_zip(
        &data.path().join("TL1.zip"),
        &[("broken.json", "{ not json")],
    );
    write_zip(
        &data.path().join("VL1.zip"),
        &[("good.json", &*label_doc("제목", &[]))],
    );
    let mut config = config(data.path(), work.path());
    config.strict = true;

    let cancel = CancelToken::new();
    let result = extract_corpus(config, Dataset::WebDataCorpus, &cancel);
    assert!(matches!(result, Err(DwkitError::MalformedDocument(_))));
    assert!(!cancel.is_cancelled());
    assert_eq!(json_files_under(&work.path().join("temp")), 0);
}

#[test]
fn test_cancelled_run_reports_cancelled() {
    let data = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();
    web_corpus_fixture(data.path());
    let config = config(data.path(), work.path());
    let output = config.output.clone();

    let cancel = CancelToken::new();
    cancel.cancel();
    let result = extract_corpus(config, Dataset::WebDataCorpus, &cancel);
    assert!(matches!(result, Err(DwkitError::Cancelled)));
    assert!(read_lines(&output).is_empty());
}

#[test]
fn test_worker_count_does_not_change_output() {
    let data = tempfile::tempdir().unwrap();
    web_corpus_fixture(data.path());

    let mut outputs = Vec::new();
    for workers in [1, 6] {
        let work = tempfile::tempdir().unwrap();
        let mut config = config(data.path(), work.path());
        config.num_workers = Some(workers);
        let output = config.output.clone();
        extract_corpus(config, Dataset::WebDataCorpus, &CancelToken::new()).unwrap();
        outputs.push(read_lines(&output).into_iter().collect::<BTreeSet<_>>());
    }
    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn test_without_unzip_reads_and_keeps_documents() {
    let data = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();
    let nested = data.path().join("expanded").join("part1");
    fs::create_dir_all(&nested).unwrap();
    let doc_path = nested.join("doc.json");
    fs::write(&doc_path, label_doc("펼친 문서", &["내용"])).unwrap();

    let mut config = config(data.path(), work.path());
    config.unzip = false;
    let output = config.output.clone();

    let summary = extract_corpus(config, Dataset::WebDataCorpus, &CancelToken::new()).unwrap();
    assert_eq!(summary.archives_found, 0);
    assert_eq!(summary.documents_extracted, 1);
    assert_eq!(read_lines(&output), vec!["펼친 문서", "내용"]);
    assert!(doc_path.exists());
    assert!(!work.path().join("temp").exists());
}

#[test]
fn test_output_is_appended() {
    let data = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();
    write_zip(
        &data.path().join("TL1.zip"),
        &[("doc.json", &*label_doc("새 줄", &[]))],
    );
    let config = config(data.path(), work.path());
    let output: PathBuf = config.output.clone();
    fs::create_dir_all(output.parent().unwrap()).unwrap();
    fs::write(&output, "이전 줄\n").unwrap();

    extract_corpus(config, Dataset::WebDataCorpus, &CancelToken::new()).unwrap();
    assert_eq!(read_lines(&output), vec!["이전 줄", "새 줄"]);
}

#[test]
fn test_pipeline_runs_once() {
    let data = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();
    let mut pipeline = Pipeline::new(config(data.path(), work.path()), Dataset::WebDataCorpus).unwrap();
    assert_eq!(pipeline.state(), PipelineState::Idle);
    let workspace = pipeline.workspace_path().unwrap().to_path_buf();
    assert!(workspace.is_dir());

    let summary = pipeline.run(&CancelToken::new()).unwrap();
    assert_eq!(summary.archives_found, 0);
    assert_eq!(pipeline.state(), PipelineState::Done);
    assert!(pipeline.state().is_terminal());
    assert!(matches!(
        pipeline.run(&CancelToken::new()),
        Err(DwkitError::Config(_))
    ));

    pipeline.close().unwrap();
    assert!(!workspace.exists());
}

/// Web corpus label extraction that cancels `token` while extracting the first document.
struct CancelOnFirstDocument {
    token: CancelToken,
    calls: Arc<AtomicUsize>,
}

impl ExtractionStrategy for CancelOnFirstDocument {
    fn name(&self) -> &'static str {
        "cancel-on-first-document"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Label]
    }

    fn archive_naming(&self, category: Category) -> ArchiveNaming {
        ArchiveNaming::split(category)
    }

    fn extract(
        &self,
        document: &StructuredDocument,
        category: Category,
    ) -> dwkit::Result<Vec<String>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            self.token.cancel();
        }
        WebDataCorpus.extract(document, category)
    }
}

#[test]
fn test_cancel_mid_archive_stops_and_cleans_up() {
    let data = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();
    let first: Vec<(String, String)> = (0..6)
        .map(|i| (format!("a_{i}.json"), label_doc(&format!("a-{i}"), &[])))
        .collect();
    let first: Vec<(&str, &str)> = first.iter().map(|(n, b)| (n.as_str(), b.as_str())).collect();
    write_zip(&data.path().join("a_TL1.zip"), &first);
    write_zip(
        &data.path().join("b_TL1.zip"),
        &[("b_0.json", &*label_doc("b-0", &[]))],
    );

    let mut config = config(data.path(), work.path());
    config.num_workers = Some(1);
    let output = config.output.clone();
    let cancel = CancelToken::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let strategy = CancelOnFirstDocument {
        token: cancel.clone(),
        calls: Arc::clone(&calls),
    };

    let mut pipeline = Pipeline::new(config, strategy).unwrap();
    let workspace = pipeline.workspace_path().unwrap().to_path_buf();
    let result = pipeline.run(&cancel);
    assert!(matches!(result, Err(DwkitError::Cancelled)));
    assert_eq!(pipeline.state(), PipelineState::Failed);

    // Only the document running at cancellation was extracted, and its lines were flushed.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let lines = read_lines(&output);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("a-"));

    let summary = pipeline.summary();
    assert_eq!(summary.archives_found, 2);
    assert_eq!(summary.archives_processed, 0);
    assert_eq!(summary.documents_found, 6);
    assert_eq!(summary.documents_extracted, 1);

    // The cancelled archive was cleaned and the next one never unpacked.
    assert_eq!(json_files_under(&workspace), 0);
    assert!(!workspace.join("archive-00000").exists());
    assert!(!workspace.join("archive-00001").exists());

    pipeline.close().unwrap();
    assert!(!workspace.exists());
}

/// Web corpus label extraction where a document titled `bad` fails quickly and one titled
/// `slow` succeeds late.
struct Staggered;

impl ExtractionStrategy for Staggered {
    fn name(&self) -> &'static str {
        "staggered"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Label]
    }

    fn archive_naming(&self, category: Category) -> ArchiveNaming {
        ArchiveNaming::split(category)
    }

    fn extract(
        &self,
        document: &StructuredDocument,
        category: Category,
    ) -> dwkit::Result<Vec<String>> {
        let lines = WebDataCorpus.extract(document, category)?;
        match lines.first().map(String::as_str) {
            Some("bad") => {
                thread::sleep(Duration::from_millis(100));
                Err(DwkitError::malformed("rejected"))
            }
            Some("slow") => {
                thread::sleep(Duration::from_millis(400));
                Ok(lines)
            }
            _ => Ok(lines),
        }
    }
}

#[test]
fn test_strict_abort_still_writes_in_flight_documents() {
    let data = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();
    write_zip(
        &data.path().join("TL1.zip"),
        &[
            ("bad.json", &*label_doc("bad", &[])),
            ("slow.json", &*label_doc("slow", &["끝까지 실행"])),
        ],
    );
    let mut config = config(data.path(), work.path());
    config.strict = true;
    config.num_workers = Some(2);
    let output = config.output.clone();

    let mut pipeline = Pipeline::new(config, Staggered).unwrap();
    let result = pipeline.run(&CancelToken::new());
    assert!(matches!(result, Err(DwkitError::MalformedDocument(_))));
    assert_eq!(pipeline.summary().documents_extracted, 1);
    assert_eq!(pipeline.summary().documents_skipped(), 1);
    assert_eq!(pipeline.summary().archives_processed, 0);
    assert_eq!(read_lines(&output), vec!["slow", "끝까지 실행"]);
    pipeline.close().unwrap();
}
