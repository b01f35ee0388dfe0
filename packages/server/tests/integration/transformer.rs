use serde_json::json;

use crate::common::{TestApp, routes};

mod crud {
    use super::*;

    #[tokio::test]
    async fn create_returns_201_with_trimmed_fields() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::TRANSFORMERS,
                &json!({
                    "number": "  TX-100 ",
                    "pole": "P1",
                    "region": "north",
                    "type": "Bulk",
                    "location": "Main St"
                }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["number"], "TX-100");
        assert_eq!(res.body["type"], "Bulk");
        assert_eq!(res.body["location"], "Main St");
        assert!(res.body["baselineImagePath"].is_null());
        assert!(res.body["baselineUploadDate"].is_null());
    }

    #[tokio::test]
    async fn create_rejects_blank_required_field() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::TRANSFORMERS,
                &json!({"number": "   ", "pole": "P1", "region": "north"}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");

        let list = app.get(routes::TRANSFORMERS).await;
        assert_eq!(list.body.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .client
            .post(format!("http://{}{}", app.addr, routes::TRANSFORMERS))
            .header("content-type", "application/json")
            .body("{\"number\": ")
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 400);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let app = TestApp::spawn().await;
        let first = app.create_transformer("TX-1").await;
        let second = app.create_transformer("TX-2").await;

        let res = app.get(routes::TRANSFORMERS).await;

        assert_eq!(res.status, 200);
        let ids: Vec<i64> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![first as i64, second as i64]);
    }

    #[tokio::test]
    async fn get_missing_returns_404() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::transformer(9999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn update_replaces_descriptive_fields() {
        let app = TestApp::spawn().await;
        let id = app.create_transformer("TX-1").await;

        let res = app
            .put(
                &routes::transformer(id),
                &json!({
                    "number": "TX-1A",
                    "pole": "P9",
                    "region": "south",
                    "weather": "Cloudy"
                }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["id"], id);
        assert_eq!(res.body["number"], "TX-1A");
        assert_eq!(res.body["region"], "south");
        assert_eq!(res.body["weather"], "Cloudy");

        let fetched = app.get(&routes::transformer(id)).await;
        assert_eq!(fetched.body["pole"], "P9");
    }

    #[tokio::test]
    async fn update_missing_returns_404() {
        let app = TestApp::spawn().await;

        let res = app
            .put(
                &routes::transformer(42),
                &json!({"number": "TX", "pole": "P", "region": "R"}),
            )
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn delete_then_get_returns_404() {
        let app = TestApp::spawn().await;
        let id = app.create_transformer("TX-1").await;

        let res = app.delete(&routes::transformer(id)).await;
        assert_eq!(res.status, 204);

        assert_eq!(app.get(&routes::transformer(id)).await.status, 404);
        assert_eq!(app.delete(&routes::transformer(id)).await.status, 404);
    }

    #[tokio::test]
    async fn delete_removes_the_transformers_inspections() {
        let app = TestApp::spawn().await;
        let doomed = app.create_transformer("TX-1").await;
        let kept = app.create_transformer("TX-2").await;
        let gone = app.create_inspection(doomed, "2024-05-01").await;
        let survivor = app.create_inspection(kept, "2024-05-01").await;

        assert_eq!(app.delete(&routes::transformer(doomed)).await.status, 204);

        assert_eq!(app.get(&routes::inspection(gone)).await.status, 404);
        assert_eq!(app.get(&routes::inspection(survivor)).await.status, 200);
        let remaining = app.get(routes::INSPECTIONS).await;
        assert_eq!(remaining.body.as_array().unwrap().len(), 1);
    }
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::HEALTH).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["status"], "ok");
    }
}
