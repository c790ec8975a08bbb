use salon_scrape::domain::model::{ReservationRecord, RunOutput};
use salon_scrape::domain::ports::{ArtifactStore, DataSink};
use salon_scrape::LocalStorage;

fn sample_output() -> RunOutput {
    RunOutput {
        reservation: ReservationRecord {
            stylist_id: "ST001".to_string(),
            date: "2024-10-02".to_string(),
            start_time: "1030".to_string(),
            term: "60".to_string(),
        },
    }
}

#[tokio::test]
async fn test_pushed_record_matches_output_contract() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(dir.path().to_string_lossy().into_owned());

    storage.push(&sample_output()).await.unwrap();

    let json = std::fs::read_to_string(dir.path().join("reservation.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    let reservation = &parsed["reservation"];
    assert_eq!(reservation["stylistId"], "ST001");
    assert_eq!(reservation["date"], "2024-10-02");
    assert_eq!(reservation["startTime"], "1030");
    assert_eq!(reservation["term"], "60");

    // Exactly the four contract fields, nothing partial or extra.
    assert_eq!(reservation.as_object().unwrap().len(), 4);
}

#[tokio::test]
async fn test_repeated_pushes_are_byte_identical() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();

    let storage_a = LocalStorage::new(dir_a.path().to_string_lossy().into_owned());
    let storage_b = LocalStorage::new(dir_b.path().to_string_lossy().into_owned());

    storage_a.push(&sample_output()).await.unwrap();
    storage_b.push(&sample_output()).await.unwrap();

    let bytes_a = std::fs::read(dir_a.path().join("reservation.json")).unwrap();
    let bytes_b = std::fs::read(dir_b.path().join("reservation.json")).unwrap();
    assert_eq!(bytes_a, bytes_b);
}

#[tokio::test]
async fn test_diagnostic_artifacts_land_under_their_keys() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(dir.path().to_string_lossy().into_owned());

    storage.save("login-result", "png", &[0x89, 0x50]).await.unwrap();
    storage
        .save("extReserveChange", "html", b"<html></html>")
        .await
        .unwrap();

    assert!(dir.path().join("login-result.png").exists());
    assert!(dir.path().join("extReserveChange.html").exists());
}
