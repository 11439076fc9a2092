//! HTTP client tests against a mock BI service

#[cfg(test)]
mod tests {
    use crate::{assert_err, assert_ok};
    use bi_portal::config::ApiConfig;
    use bi_portal::core::assets::{AssetType, SharingModel, Tag};
    use bi_portal::core::metadata::{DataClassification, FieldMetadata};
    use bi_portal::{AssetApi, FolderApi, FolderMember, HttpPortalClient, PortalError, TagApi};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, api_key: Option<&str>) -> HttpPortalClient {
        let config = ApiConfig {
            base_url: format!("{}/api", server.uri()),
            api_key: api_key.map(str::to_string),
            ..Default::default()
        };
        HttpPortalClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_list_folders_with_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/folders"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "folders": [
                    { "id": "f-1", "name": "Shared-Q4", "sharingModel": "ACCOUNT" },
                    { "id": "f-2", "name": "Mine", "sharingModel": "PRIVATE" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("secret"));
        let folders = assert_ok!(client.list_folders().await);

        assert_eq!(folders.len(), 2);
        assert_eq!(folders[0].sharing_model, SharingModel::Account);
        assert!(!folders[1].is_shared());
    }

    #[tokio::test]
    async fn test_add_member_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/folders/f-1/members"))
            .and(body_json(json!({ "memberType": "ANALYSIS", "memberId": "a-7" })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let member = FolderMember::new(AssetType::Analysis, "a-7");
        assert_ok!(client.add_member("f-1", member).await);
    }

    #[tokio::test]
    async fn test_forbidden_maps_to_access_denied() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/folders/f-1/members"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({ "message": "access denied" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let member = FolderMember::new(AssetType::Dashboard, "d-3");
        let err = assert_err!(client.add_member("f-1", member).await);

        assert!(matches!(err, PortalError::AccessDenied(_)));
        assert_eq!(err.detail(), "access denied");
    }

    #[tokio::test]
    async fn test_server_error_keeps_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags/dashboard/d-1"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance window"))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = assert_err!(client.get_resource_tags("dashboard", "d-1").await);

        assert!(matches!(err, PortalError::Api { status: 503, .. }));
        assert_eq!(err.detail(), "maintenance window");
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_tags_read_and_full_replace() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags/dataset/ds-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tags": [{ "key": "A", "value": "1" }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/tags/dataset/ds-1"))
            .and(body_json(json!({
                "tags": [{ "key": "A", "value": "1" }, { "key": "B", "value": "2" }]
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let mut tags = assert_ok!(client.get_resource_tags("dataset", "ds-1").await);
        assert_eq!(tags, vec![Tag::new("A", "1")]);

        tags.push(Tag::new("B", "2"));
        assert_ok!(client.update_resource_tags("dataset", "ds-1", tags).await);
    }

    #[tokio::test]
    async fn test_path_segments_are_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags/dashboard/sales%20q4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tags": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let tags = assert_ok!(client.get_resource_tags("dashboard", "sales q4").await);
        assert!(tags.is_empty());
    }

    #[tokio::test]
    async fn test_missing_field_metadata_is_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/metadata/dataset/ds-1/fields/email"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let metadata = assert_ok!(client.get_field_metadata("dataset", "ds-1", "email").await);
        assert_eq!(metadata, FieldMetadata::default());
    }

    #[tokio::test]
    async fn test_update_field_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/metadata/dataset/ds-1/fields/email"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let metadata = FieldMetadata {
            classification: DataClassification::Confidential,
            pii: true,
            data_quality_score: Some(95.0),
            ..Default::default()
        };
        assert_ok!(
            client
                .update_field_metadata("dataset", "ds-1", "email", metadata)
                .await
        );
    }

    #[tokio::test]
    async fn test_invalid_field_metadata_is_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let metadata = FieldMetadata {
            data_quality_score: Some(140.0),
            ..Default::default()
        };
        let err = assert_err!(
            client
                .update_field_metadata("dataset", "ds-1", "email", metadata)
                .await
        );
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_list_assets_by_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/assets"))
            .and(query_param("type", "datasource"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "assets": [{ "id": "src-1", "name": "Warehouse", "type": "datasource" }]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let assets = assert_ok!(client.list_assets(AssetType::Datasource).await);
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].name, "Warehouse");
    }

    #[tokio::test]
    async fn test_unauthorized_and_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/folders"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/assets"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({ "message": "slow down" })))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = assert_err!(client.list_folders().await);
        assert!(matches!(err, PortalError::Auth(_)));

        let err = assert_err!(client.list_assets(AssetType::Dashboard).await);
        assert!(matches!(err, PortalError::RateLimit(_)));
        assert_eq!(err.detail(), "slow down");
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/folders"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "folders": [] }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = ApiConfig {
            base_url: format!("{}/api", server.uri()),
            timeout_secs: 1,
            ..Default::default()
        };
        let client = HttpPortalClient::new(&config).unwrap();
        let err = assert_err!(client.list_folders().await);
        assert!(matches!(err, PortalError::Timeout(_)));
    }
}
