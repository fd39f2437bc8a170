use campus_core::store::{
    ensure_all, Careers, Collection, Documents, EmotionalEntries, Enrollments, Groups, Profiles,
    Subjects,
};
use campus_core::{Career, DocumentStore, JsonDocumentStore, StoreError};
use std::fs;

#[test]
fn first_load_seeds_file_from_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDocumentStore::open(dir.path()).unwrap();
    let path = store.path_of::<Careers>();
    assert!(!path.exists());

    let careers = store.load::<Careers>().unwrap();

    assert!(!careers.is_empty());
    assert!(path.exists());
    let on_disk: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        on_disk["careers"].as_array().unwrap().len(),
        careers.len()
    );
}

#[test]
fn later_loads_read_the_file_not_the_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDocumentStore::open(dir.path()).unwrap();
    let only = vec![Career {
        id: "1".to_string(),
        name: "Robotica".to_string(),
    }];

    store.save::<Careers>(&only).unwrap();

    assert_eq!(store.load::<Careers>().unwrap(), only);
    let reopened = JsonDocumentStore::open(dir.path()).unwrap();
    assert_eq!(reopened.load::<Careers>().unwrap(), only);
}

#[test]
fn save_rewrites_the_whole_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDocumentStore::open(dir.path()).unwrap();
    let mut groups = store.load::<Groups>().unwrap();
    let seeded = groups.len();

    groups.truncate(1);
    store.save::<Groups>(&groups).unwrap();

    assert!(seeded > 1);
    assert_eq!(store.load::<Groups>().unwrap().len(), 1);
}

#[test]
fn corrupt_document_is_reported_and_left_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDocumentStore::open(dir.path()).unwrap();
    let path = store.path_of::<Subjects>();
    fs::write(&path, "{ \"subjects\": [ {").unwrap();

    let err = store.load::<Subjects>().unwrap_err();

    assert!(matches!(err, StoreError::Parse { collection: "subjects", .. }));
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ \"subjects\": [ {");
}

#[test]
fn document_with_wrong_key_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDocumentStore::open(dir.path()).unwrap();
    fs::write(store.path_of::<Enrollments>(), r#"{ "inscripciones": [] }"#).unwrap();

    let err = store.load::<Enrollments>().unwrap_err();
    assert!(matches!(err, StoreError::MissingCollection("enrollments")));
}

#[test]
fn ensure_all_materializes_every_collection() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDocumentStore::open(dir.path()).unwrap();

    ensure_all(&store).unwrap();

    for file_name in [
        Profiles::FILE_NAME,
        Careers::FILE_NAME,
        Subjects::FILE_NAME,
        Groups::FILE_NAME,
        Enrollments::FILE_NAME,
        EmotionalEntries::FILE_NAME,
        Documents::FILE_NAME,
    ] {
        assert!(dir.path().join(file_name).exists(), "{file_name} missing");
    }
    let leftovers = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| !entry.file_name().to_string_lossy().ends_with(".json"))
        .count();
    assert_eq!(leftovers, 0, "temp files must not remain after writes");
}
