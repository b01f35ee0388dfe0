use crate::common::{TestApp, routes};

const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

mod baseline {
    use super::*;

    #[tokio::test]
    async fn stores_file_links_it_and_serves_it() {
        let app = TestApp::spawn().await;
        let tid = app.create_transformer("TX-1").await;

        let res = app
            .upload(
                &routes::upload_baseline(tid),
                "pole photo.jpg",
                JPEG_BYTES.to_vec(),
                Some("Sunny"),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["message"], "Image uploaded successfully");
        assert_eq!(res.body["weather"], "Sunny");
        let image_path = res.body["imagePath"].as_str().unwrap().to_string();
        assert!(image_path.starts_with("/uploads/"));
        assert!(image_path.ends_with("_pole photo.jpg"));
        assert_eq!(app.stored_files(), 1);

        let transformer = app.get(&routes::transformer(tid)).await;
        assert_eq!(transformer.body["baselineImagePath"], image_path.as_str());
        assert_eq!(transformer.body["weather"], "Sunny");
        assert!(transformer.body["baselineUploadDate"].is_string());

        let encoded = image_path.replace(' ', "%20");
        let (status, bytes) = app.get_bytes(&encoded).await;
        assert_eq!(status, 200);
        assert_eq!(bytes, JPEG_BYTES);
    }

    #[tokio::test]
    async fn second_upload_replaces_the_link() {
        let app = TestApp::spawn().await;
        let tid = app.create_transformer("TX-1").await;

        let first = app
            .upload(&routes::upload_baseline(tid), "a.jpg", JPEG_BYTES.to_vec(), Some("Sunny"))
            .await;
        let second = app
            .upload(&routes::upload_baseline(tid), "a.jpg", JPEG_BYTES.to_vec(), Some("Rainy"))
            .await;

        assert_eq!(second.status, 200);
        assert_ne!(first.body["imagePath"], second.body["imagePath"]);

        let transformer = app.get(&routes::transformer(tid)).await;
        assert_eq!(transformer.body["baselineImagePath"], second.body["imagePath"]);
        assert_eq!(transformer.body["weather"], "Rainy");
    }

    #[tokio::test]
    async fn empty_file_is_rejected_without_changes() {
        let app = TestApp::spawn().await;
        let tid = app.create_transformer("TX-1").await;

        let res = app
            .upload(&routes::upload_baseline(tid), "empty.jpg", vec![], Some("Sunny"))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
        assert_eq!(app.stored_files(), 0);

        let transformer = app.get(&routes::transformer(tid)).await;
        assert!(transformer.body["baselineImagePath"].is_null());
        assert!(transformer.body["weather"].is_null());
    }

    #[tokio::test]
    async fn missing_weather_is_rejected() {
        let app = TestApp::spawn().await;
        let tid = app.create_transformer("TX-1").await;

        let res = app
            .upload(&routes::upload_baseline(tid), "a.jpg", JPEG_BYTES.to_vec(), None)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(app.stored_files(), 0);
    }

    #[tokio::test]
    async fn unknown_transformer_returns_404_and_writes_nothing() {
        let app = TestApp::spawn().await;

        let res = app
            .upload(&routes::upload_baseline(31337), "a.jpg", JPEG_BYTES.to_vec(), Some("Sunny"))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NOT_FOUND");
        assert_eq!(app.stored_files(), 0);
    }

    #[tokio::test]
    async fn oversized_file_is_rejected() {
        let app = TestApp::spawn_with_upload_limit(8).await;
        let tid = app.create_transformer("TX-1").await;

        let res = app
            .upload(&routes::upload_baseline(tid), "big.jpg", vec![1u8; 64], Some("Sunny"))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(app.stored_files(), 0);
    }

    #[tokio::test]
    async fn path_components_in_filename_are_dropped() {
        let app = TestApp::spawn().await;
        let tid = app.create_transformer("TX-1").await;

        let res = app
            .upload(
                &routes::upload_baseline(tid),
                "../../etc/passwd.jpg",
                JPEG_BYTES.to_vec(),
                Some("Sunny"),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let image_path = res.body["imagePath"].as_str().unwrap();
        assert!(image_path.ends_with("_passwd.jpg"));
        assert!(!image_path.contains(".."));
        assert_eq!(app.upload_dir().read_dir().unwrap().count(), 1);
    }

    #[tokio::test]
    async fn url_breaking_filename_is_rejected() {
        let app = TestApp::spawn().await;
        let tid = app.create_transformer("TX-1").await;

        for name in ["photo#1.jpg", "a?b.jpg"] {
            let res = app
                .upload(&routes::upload_baseline(tid), name, JPEG_BYTES.to_vec(), Some("Sunny"))
                .await;
            assert_eq!(res.status, 400, "{name}: {}", res.text);
            assert_eq!(res.code(), "VALIDATION_ERROR");
        }
        assert_eq!(app.stored_files(), 0);
    }

    #[tokio::test]
    async fn blank_weather_is_rejected() {
        let app = TestApp::spawn().await;
        let tid = app.create_transformer("TX-1").await;

        let res = app
            .upload(&routes::upload_baseline(tid), "a.jpg", JPEG_BYTES.to_vec(), Some("   "))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(app.stored_files(), 0);
        let transformer = app.get(&routes::transformer(tid)).await;
        assert!(transformer.body["weather"].is_null());
    }
}

mod maintenance {
    use super::*;

    #[tokio::test]
    async fn stores_file_and_links_it_to_inspection() {
        let app = TestApp::spawn().await;
        let tid = app.create_transformer("TX-1").await;
        let iid = app.create_inspection(tid, "2024-05-01").await;

        let res = app
            .upload(
                &routes::upload_maintenance(iid),
                "after.jpg",
                JPEG_BYTES.to_vec(),
                Some("Cloudy"),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let image_path = res.body["imagePath"].as_str().unwrap().to_string();
        assert!(image_path.ends_with("_after.jpg"));

        let inspection = app.get(&routes::inspection(iid)).await;
        assert_eq!(inspection.body["maintenanceImagePath"], image_path.as_str());
        assert_eq!(inspection.body["maintenanceWeather"], "Cloudy");
        assert!(inspection.body["maintenanceUploadDate"].is_string());

        // The transformer's own weather is untouched.
        let transformer = app.get(&routes::transformer(tid)).await;
        assert!(transformer.body["weather"].is_null());

        let (status, bytes) = app.get_bytes(&image_path).await;
        assert_eq!(status, 200);
        assert_eq!(bytes, JPEG_BYTES);
    }

    #[tokio::test]
    async fn unknown_inspection_returns_404() {
        let app = TestApp::spawn().await;

        let res = app
            .upload(&routes::upload_maintenance(8), "a.jpg", JPEG_BYTES.to_vec(), Some("Sunny"))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(app.stored_files(), 0);
    }

    #[tokio::test]
    async fn empty_file_is_rejected() {
        let app = TestApp::spawn().await;
        let tid = app.create_transformer("TX-1").await;
        let iid = app.create_inspection(tid, "2024-05-01").await;

        let res = app
            .upload(&routes::upload_maintenance(iid), "a.jpg", vec![], Some("Sunny"))
            .await;

        assert_eq!(res.status, 400);
        let inspection = app.get(&routes::inspection(iid)).await;
        assert!(inspection.body["maintenanceImagePath"].is_null());
    }
}
