//! File selection integration tests

use presign_uploadr::notify::RecordingNotifier;
use presign_uploadr::selector::{
    sanitize_file_name, FileSelector, RawFile, SelectError, ALLOWED_TYPES, INVALID_TYPE_MESSAGE,
};
use std::sync::Arc;

fn selector() -> (FileSelector, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    (FileSelector::new(notifier.clone()), notifier)
}

#[test]
fn test_resume_with_accents_and_parens_is_accepted() {
    let (mut selector, notifier) = selector();

    let selected = selector
        .select_file(Some(RawFile::new(
            "My Résumé (final).pdf",
            "application/pdf",
            "%PDF",
        )))
        .unwrap()
        .unwrap();

    assert_eq!(selected.name(), "my_r_sum___final_.pdf");
    assert!(selected.name().is_ascii());
    assert!(notifier.messages().is_empty());
}

#[test]
fn test_executable_is_rejected_with_alert() {
    let (mut selector, notifier) = selector();

    let result = selector.select_file(Some(RawFile::new(
        "installer.exe",
        "application/x-msdownload",
        "MZ",
    )));

    assert!(matches!(result, Err(SelectError::InvalidFileType { .. })));
    assert!(selector.current().is_none());
    assert_eq!(notifier.messages(), vec![INVALID_TYPE_MESSAGE.to_string()]);
}

#[test]
fn test_every_allowed_type_is_accepted() {
    for mime_type in ALLOWED_TYPES {
        let (mut selector, notifier) = selector();
        assert!(selector
            .select_file(Some(RawFile::new("doc", mime_type, "x")))
            .unwrap()
            .is_some());
        assert!(notifier.messages().is_empty());
    }
}

#[test]
fn test_common_disallowed_types_are_rejected() {
    let rejected = [
        "",
        "text/plain",
        "image/png",
        "application/zip",
        "application/pdf; charset=binary",
        "application/vnd.ms-excel",
    ];

    for mime_type in rejected {
        let (mut selector, notifier) = selector();
        assert!(
            selector
                .select_file(Some(RawFile::new("doc.pdf", mime_type, "x")))
                .is_err(),
            "{mime_type:?} should be rejected"
        );
        assert_eq!(notifier.messages().len(), 1);
    }
}

#[test]
fn test_drop_of_many_attaches_first_only() {
    let (mut selector, _notifier) = selector();
    selector.drag_over();

    let files = (0..5)
        .map(|i| RawFile::new(format!("Doc {i}.pdf"), "application/pdf", vec![i as u8]))
        .collect();
    selector.drop_files(files).unwrap();

    let current = selector.current().unwrap();
    assert_eq!(current.name(), "doc_0.pdf");
    assert_eq!(current.bytes().as_ref(), &[0u8]);
    assert!(!selector.is_dragging());
}

#[test]
fn test_sanitize_is_idempotent_on_awkward_names() {
    let names = [
        "../../etc/passwd",
        "C:\\Users\\me\\CV.docx",
        "tab\there.pdf",
        "emoji 🎉.pdf",
        "UPPER-lower_Mixed.DOC",
        "",
    ];

    for name in names {
        let once = sanitize_file_name(name);
        assert_eq!(sanitize_file_name(&once), once);
        assert!(!once.contains('/'));
        assert!(!once.contains('\\'));
        assert_eq!(once, once.to_lowercase());
    }
}
