use std::time::{Duration, Instant};

use flashpad::core::block_editor::{BlockEditor, CursorPlacement, EditorEvent, FocusRequest};
use flashpad::core::config::AppConfig;
use flashpad::core::credentials::{Credentials, LocalStore, DEFAULT_API_URL};
use flashpad::core::line::LineMode;
use flashpad::core::session::{DocumentSession, SaveDecision, SaveStatus};
use flashpad::core::document::DocumentId;

fn type_line(editor: &mut BlockEditor, line: usize, text: &str) {
    editor.handle(EditorEvent::Focus(line));
    editor.handle(EditorEvent::Input {
        line,
        text: text.to_string(),
    });
}

#[test]
fn test_writing_a_short_note() {
    let mut editor = BlockEditor::new();

    type_line(&mut editor, 0, "# Groceries");
    assert!(editor.handle(EditorEvent::Enter(0)));
    assert_eq!(
        editor.take_focus_request(),
        Some(FocusRequest {
            line: 1,
            cursor: CursorPlacement::Start
        })
    );

    type_line(&mut editor, 1, "- **milk**");
    editor.handle(EditorEvent::Enter(1));
    // an empty line left by Enter is removed again by Backspace
    assert!(editor.handle(EditorEvent::Backspace(2)));
    editor.handle(EditorEvent::Blur(1));

    assert_eq!(editor.serialize(), "# Groceries\n- **milk**");
    let heading = editor.line(0).unwrap();
    assert_eq!(heading.mode(), LineMode::Preview);
    assert_eq!(heading.rendered_html().trim(), "<h1>Groceries</h1>");
    assert!(editor
        .line(1)
        .unwrap()
        .rendered_html()
        .contains("<strong>milk</strong>"));
}

#[test]
fn test_loaded_text_round_trips() {
    for text in ["", "one", "a\n\nb", "\n\n", "# t\n- x\n\n> q\n"] {
        let editor = BlockEditor::from_text(text);
        assert!(editor.len() >= 1);
        assert_eq!(editor.serialize(), text);
    }
}

#[test]
fn test_blank_lines_stay_editable_after_blur() {
    let mut editor = BlockEditor::from_text("a\n\nb");
    editor.handle(EditorEvent::Focus(1));
    editor.handle(EditorEvent::Blur(1));
    let blank = editor.line(1).unwrap();
    assert_eq!(blank.mode(), LineMode::Edit);
    assert!(blank.placeholder_visible());
}

#[test]
fn test_session_autosaves_once_after_typing_burst() {
    let quiet = AppConfig::default().editor.autosave_delay();
    let t0 = Instant::now();
    let mut session = DocumentSession::new(quiet);
    session.set_title("Plan", t0);

    let mut saves = 0;
    for i in 0..5u64 {
        let now = t0 + Duration::from_millis(100 * i);
        session.apply(EditorEvent::Focus(0), now);
        session.apply(
            EditorEvent::Input {
                line: 0,
                text: format!("step {i}"),
            },
            now,
        );
        if matches!(session.poll_autosave(now), SaveDecision::Started(_)) {
            saves += 1;
        }
    }

    let due = t0 + Duration::from_millis(400) + quiet;
    let request = match session.poll_autosave(due) {
        SaveDecision::Started(request) => request,
        other => panic!("expected autosave, got {other:?}"),
    };
    saves += 1;
    assert_eq!(saves, 1);
    assert_eq!(request.draft.title, "Plan");
    assert_eq!(request.draft.content, "step 4");

    assert!(session.complete_save(&request.ticket, &Ok(DocumentId::Number(3))));
    assert_eq!(session.status(), SaveStatus::Saved);
    assert_eq!(session.document_id(), Some(&DocumentId::Number(3)));
}

#[test]
fn test_config_and_login_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    let config_path = dir.path().join("config.json");
    let mut config = AppConfig::default();
    config.editor.autosave_delay_ms = 500;
    config.ui.sidebar_visible = false;
    config.save_to(&config_path).unwrap();
    assert_eq!(AppConfig::load_from(&config_path).unwrap(), config);

    let storage_path = dir.path().join("storage.json");
    {
        let mut store = LocalStore::open(&storage_path).unwrap();
        Credentials::store_login(&mut store, "tok", "me@example.test", "premium").unwrap();
    }
    let mut store = LocalStore::open(&storage_path).unwrap();
    let credentials = Credentials::from_store(&store);
    assert!(credentials.is_authenticated());
    assert_eq!(credentials.api_url, DEFAULT_API_URL);

    let cleared = Credentials::clear_login(&mut store).unwrap();
    assert!(!cleared.is_authenticated());
}
