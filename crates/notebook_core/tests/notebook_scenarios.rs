use notebook_core::db::open_db;
use notebook_core::{
    Category, ErrorKind, NewNote, NoteListQuery, NotePatch, Notebook, NotebookConfig,
};
use serde_json::json;

#[test]
fn tagging_survives_until_category_is_deleted() {
    let mut notebook = Notebook::open_in_memory().unwrap();

    let work = notebook.create_category("Work").unwrap();
    let note = notebook.create_note(NewNote::new("T", "C")).unwrap();
    notebook.set_note_categories(note.id, &[work.id]).unwrap();

    let tagged = notebook.get_note(note.id).unwrap();
    assert_eq!(
        tagged.categories,
        vec![Category {
            id: work.id,
            name: "Work".to_string(),
        }]
    );

    notebook.delete_category(work.id).unwrap();
    let untagged = notebook.get_note(note.id).unwrap();
    assert!(untagged.categories.is_empty());
}

#[test]
fn created_category_appears_exactly_once_in_listing() {
    let mut notebook = Notebook::open_in_memory().unwrap();
    for name in ["Work", "  Errands", "Reading  "] {
        let created = notebook.create_category(name).unwrap();
        let matching = notebook
            .list_categories()
            .unwrap()
            .into_iter()
            .filter(|category| category.name == name.trim())
            .count();
        assert_eq!(matching, 1, "category {} should be listed once", created.id);
    }

    let err = notebook.create_category("Work ").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    let err = notebook.rename_category(12_345, "Other").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn list_without_filters_returns_all_notes_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notebook.db");
    let mut notebook = Notebook::open(&path).unwrap();
    let raw = open_db(&path).unwrap();

    let mut ids = Vec::new();
    for idx in 0..3 {
        let note = notebook
            .create_note(NewNote::new(format!("note {idx}"), "").archived(idx == 1))
            .unwrap();
        raw.execute(
            "UPDATE notes SET created_at = ?2, updated_at = ?2 WHERE id = ?1;",
            rusqlite::params![note.id, 1_000 + idx],
        )
        .unwrap();
        ids.push(note.id);
    }
    ids.reverse();

    let listed: Vec<i64> = notebook
        .list_notes(NoteListQuery::default())
        .unwrap()
        .into_iter()
        .map(|note| note.id)
        .collect();
    assert_eq!(listed, ids);
}

#[test]
fn note_serializes_with_inline_categories_and_camel_case_keys() {
    let mut notebook = Notebook::open_in_memory().unwrap();
    let work = notebook.create_category("Work").unwrap();
    let note = notebook.create_note(NewNote::new("T", "C")).unwrap();
    let note = notebook.set_note_categories(note.id, &[work.id]).unwrap();

    let value = serde_json::to_value(&note).unwrap();
    assert_eq!(value["id"], json!(note.id));
    assert_eq!(value["archived"], json!(false));
    assert_eq!(value["createdAt"], json!(note.created_at));
    assert_eq!(value["updatedAt"], json!(note.updated_at));
    assert_eq!(
        value["categories"],
        json!([{ "id": work.id, "name": "Work" }])
    );
    assert!(value.get("created_at").is_none());
}

#[test]
fn write_requests_deserialize_from_boundary_payloads() {
    let new_note: NewNote =
        serde_json::from_value(json!({ "title": "T", "content": "C" })).unwrap();
    assert_eq!(new_note, NewNote::new("T", "C"));

    let patch: NotePatch = serde_json::from_value(json!({ "archived": true })).unwrap();
    assert_eq!(patch, NotePatch::archived(true));
}

#[test]
fn file_backed_notebook_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notebook.db");

    let (note_id, work_id) = {
        let mut notebook = Notebook::open(&path).unwrap();
        let work = notebook.create_category("Work").unwrap();
        let note = notebook.create_note(NewNote::new("T", "C")).unwrap();
        notebook.set_note_categories(note.id, &[work.id]).unwrap();
        notebook.archive_note(note.id).unwrap();
        (note.id, work.id)
    };

    let mut reopened = Notebook::from_connection(open_db(&path).unwrap()).unwrap();
    let note = reopened.get_note(note_id).unwrap();
    assert!(note.archived);
    assert_eq!(note.category_ids(), vec![work_id]);
    assert_eq!(reopened.get_category(work_id).unwrap().name, "Work");
}

#[test]
fn config_selects_database_location() {
    let dir = tempfile::tempdir().unwrap();
    let config = NotebookConfig {
        db_path: Some(dir.path().join("configured.db")),
        ..NotebookConfig::default()
    };

    let mut notebook = Notebook::open_with_config(&config).unwrap();
    notebook.create_category("Work").unwrap();
    assert!(dir.path().join("configured.db").exists());

    let mut scratch = Notebook::open_with_config(&NotebookConfig::default()).unwrap();
    assert!(scratch.list_categories().unwrap().is_empty());
    assert!(scratch.find_category_by_name("Work").unwrap().is_none());
}

#[test]
fn unmigrated_connection_is_rejected_up_front() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    let err = Notebook::from_connection(conn).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert!(err.to_string().contains("categories"));
}
