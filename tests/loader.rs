use std::fs;

use crm_graph::crm::{GroupId, PersonId, load_options, load_snapshot};

#[test]
fn loads_snapshot_file_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("snapshot.json");
    fs::write(
        &path,
        r##"{
            "people": [
                {"id": 1, "displayName": "Ada Lovelace", "affiliation": "Analytical Society"},
                {"id": 2, "displayName": "Bob Noyce"}
            ],
            "relationships": [{"fromId": 1, "toId": 2}],
            "groups": [{"id": 10, "name": "Board", "color": "#336699", "memberIds": [1]}],
            "selfId": 1
        }"##,
    )
    .expect("write snapshot");

    let snapshot = load_snapshot(&path).expect("snapshot loads");
    assert_eq!(snapshot.people.len(), 2);
    assert_eq!(snapshot.self_id, Some(PersonId(1)));
    assert_eq!(
        snapshot.group(GroupId(10)).map(|group| group.member_ids.clone()),
        Some(vec![PersonId(1)])
    );
    assert_eq!(snapshot.resolvable_relationship_count(), 1);
}

#[test]
fn missing_snapshot_names_the_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.json");

    let error = load_snapshot(&path).expect_err("missing file fails");
    assert!(format!("{error:#}").contains("absent.json"));
}

#[test]
fn options_file_is_defaulted_and_clamped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("options.json");
    fs::write(
        &path,
        r#"{"hideOrphans": true, "personLineOpacity": 3.5, "highlightPersonId": 7}"#,
    )
    .expect("write options");

    let options = load_options(&path).expect("options load");
    assert!(options.hide_orphans);
    assert!(options.show_groups);
    assert_eq!(options.person_line_opacity, 1.0);
    assert_eq!(options.highlight_person_id, Some(PersonId(7)));
}
