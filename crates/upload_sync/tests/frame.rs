use pretty_assertions::assert_eq;
use upload_core::{ListQuery, ListSnapshot, SortField, SortOrder, TaskStatus};
use upload_sync::{decode_frame, encode_frame, ClientFrame, FrameError, ServerFrame};

fn init_logging() {
    sync_logging::initialize_for_tests();
}

#[test]
fn list_query_frame_matches_wire_contract() {
    init_logging();
    let frame = ClientFrame::ListQuery(ListQuery {
        page: 2,
        size: 20,
        sort_order: SortOrder::Asc,
        sort_by: SortField::CreatedAt,
    });
    let text = encode_frame(&frame).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(
        value,
        serde_json::json!({
            "event": "upload/list",
            "data": {"page": 2, "size": 20, "sortOrder": "ASC", "sortBy": "createdAt"}
        })
    );
}

#[test]
fn delete_frame_carries_ids() {
    init_logging();
    let text = encode_frame(&ClientFrame::Delete { ids: vec![3, 5] }).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(
        value,
        serde_json::json!({"event": "upload/delete", "data": {"ids": [3, 5]}})
    );
}

#[test]
fn snapshot_frame_decodes() {
    init_logging();
    let text = r#"{"event":"list","data":{"list":[{"id":1,"name":"movie.mkv",
        "directory":"/media","hash":"abc","uuid":"c0ffee","size":1000,"receive":"500",
        "status":"processing","updatedAt":1700000000000,"createdAt":1690000000000}],"total":1}}"#;

    let ServerFrame::Snapshot(snapshot) = decode_frame(text).unwrap() else {
        panic!("expected snapshot");
    };
    assert_eq!(snapshot.total, 1);
    let task = &snapshot.list[0];
    assert_eq!(task.id, 1);
    assert_eq!(task.name, "movie.mkv");
    assert_eq!(task.size, 1000);
    assert_eq!(task.received, 500);
    assert_eq!(task.status, TaskStatus::Processing);
    assert_eq!(task.updated_at, 1_700_000_000_000);
}

#[test]
fn empty_snapshot_decodes() {
    init_logging();
    let frame = decode_frame(r#"{"event":"list","data":{"list":[],"total":0}}"#).unwrap();
    assert_eq!(frame, ServerFrame::Snapshot(ListSnapshot::default()));
}

#[test]
fn exception_frame_ignores_extra_fields() {
    init_logging();
    let frame =
        decode_frame(r#"{"event":"exception","data":{"message":"task not found","code":404}}"#)
            .unwrap();
    assert_eq!(
        frame,
        ServerFrame::Error {
            message: "task not found".to_string()
        }
    );
}

#[test]
fn unknown_and_malformed_frames_are_errors() {
    init_logging();
    assert!(matches!(
        decode_frame(r#"{"event":"presence","data":{}}"#),
        Err(FrameError::UnknownEvent(name)) if name == "presence"
    ));
    assert!(matches!(
        decode_frame(r#"{"data":{}}"#),
        Err(FrameError::MissingEvent)
    ));
    assert!(matches!(decode_frame("not json"), Err(FrameError::Json(_))));
    assert!(matches!(
        decode_frame(r#"{"event":"list","data":{"total":"many"}}"#),
        Err(FrameError::Json(_))
    ));
}
