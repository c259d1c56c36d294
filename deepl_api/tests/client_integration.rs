use deepl_api::types::{
    CreateGlossary, DocumentHandle, DocumentState, DocumentUpload, Formality, GlossaryEntries,
    GlossaryId, TranslateRequest,
};
use deepl_api::{Client, Error, ErrorKind, LanguageType};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn client(mock_server: &MockServer) -> Client {
    Client::with_base_url(&mock_server.uri(), "test-key:fx").unwrap()
}

#[tokio::test]
async fn get_usage_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/usage"))
        .and(header("Authorization", "DeepL-Auth-Key test-key:fx"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("usage.json")))
        .mount(&mock_server)
        .await;

    let usage = client(&mock_server).get_usage().await.unwrap();
    assert_eq!(usage.character_count, 180118);
    assert_eq!(usage.character_limit, 1250000);
    assert_eq!(usage.document_count, Some(5));
    assert_eq!(usage.team_document_count, None);
}

#[tokio::test]
async fn get_usage_invalid_key() {
    let mock_server = MockServer::start().await;
    Mock::given(path("/usage"))
        .respond_with(ResponseTemplate::new(403).set_body_string(r#"{"message":"Wrong endpoint"}"#))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).get_usage().await.unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::Forbidden));
    assert!(err.to_string().ends_with(", message : Wrong endpoint"));
}

#[tokio::test]
async fn get_usage_without_limit_fails_validation() {
    let mock_server = MockServer::start().await;
    Mock::given(path("/usage"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"character_count": 10}"#))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).get_usage().await.unwrap_err();
    assert!(matches!(err, Error::Validation(ref v) if v.field() == "character_limit"));
}

#[tokio::test]
async fn get_target_languages_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/languages"))
        .and(query_param("type", "target"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("languages_target.json")),
        )
        .mount(&mock_server)
        .await;

    let languages = client(&mock_server).get_target_languages().await.unwrap();
    assert_eq!(languages.len(), 4);
    assert_eq!(languages[1].language, "DE");
    assert_eq!(languages[1].supports_formality, Some(true));
}

#[tokio::test]
async fn unrecognized_language_type_lists_sources() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/languages"))
        .and(query_param("type", "source"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("languages_source.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let language_type: LanguageType = "sideways".parse().unwrap();
    let languages = client(&mock_server)
        .get_languages(language_type)
        .await
        .unwrap();
    assert_eq!(languages.len(), 3);
    assert_eq!(languages[2].supports_formality, None);
}

#[tokio::test]
async fn get_languages_with_nameless_entry_fails() {
    let mock_server = MockServer::start().await;
    Mock::given(path("/languages"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"[{"language":"DE","name":"German"},{"language":"FR"}]"#),
        )
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).get_source_languages().await.unwrap_err();
    assert!(matches!(err, Error::Validation(ref v) if v.field() == "[1].name"));
}

#[tokio::test]
async fn get_glossary_language_pairs_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/glossary-language-pairs"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("glossary_language_pairs.json")),
        )
        .mount(&mock_server)
        .await;

    let pairs = client(&mock_server)
        .get_glossary_language_pairs()
        .await
        .unwrap();
    assert_eq!(pairs.supported_languages.len(), 3);
    assert_eq!(pairs.supported_languages[2].target_lang, "fr");
}

#[tokio::test]
async fn get_glossary_language_pairs_unauthorized() {
    let mock_server = MockServer::start().await;
    Mock::given(path("/glossary-language-pairs"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .get_glossary_language_pairs()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::AuthorizationFailed));
}

#[tokio::test]
async fn translate_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_json(serde_json::json!({
            "text": ["Hello, world!", "Good morning"],
            "target_lang": "DE",
            "formality": "less"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("translate.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = TranslateRequest::new("DE")
        .with_text("Hello, world!")
        .with_text("Good morning")
        .with_formality(Formality::Less);
    let resp = client(&mock_server).translate(&request).await.unwrap();
    assert_eq!(resp.texts(), vec!["Hallo, Welt!", "Guten Morgen"]);
    assert_eq!(resp.translations[0].detected_source_language, "EN");
}

#[tokio::test]
async fn translate_quota_exceeded() {
    let mock_server = MockServer::start().await;
    Mock::given(path("/translate"))
        .respond_with(ResponseTemplate::new(456))
        .mount(&mock_server)
        .await;

    let request = TranslateRequest::new("DE").with_text("Hello");
    let err = client(&mock_server).translate(&request).await.unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::QuotaExceeded));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn glossary_lifecycle() {
    let mock_server = MockServer::start().await;
    let id = "def3a26b-3e84-45b3-84ae-0c0aaf3525f7";

    Mock::given(method("POST"))
        .and(path("/glossaries"))
        .and(body_json(serde_json::json!({
            "name": "My Glossary",
            "source_lang": "en",
            "target_lang": "de",
            "entries": "artist\tMaler",
            "entries_format": "tsv"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_string(load_fixture("glossary.json")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/glossaries/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("glossary.json")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/glossaries/{}/entries", id)))
        .and(header("Accept", "text/tab-separated-values"))
        .respond_with(ResponseTemplate::new(200).set_body_string("artist\tMaler\n"))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/glossaries/{}", id)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let entries = GlossaryEntries::new().with_entry("artist", "Maler");

    let created = client
        .create_glossary(&CreateGlossary::new("My Glossary", "en", "de", &entries))
        .await
        .unwrap();
    assert_eq!(created.glossary_id.as_str(), id);

    let glossary_id = GlossaryId::from(id);
    let glossary = client.get_glossary(&glossary_id).await.unwrap();
    assert_eq!(glossary.name, "My Glossary");
    assert!(glossary.ready);
    assert_eq!(glossary.entry_count, 1);
    assert!(glossary.creation_time.is_some());

    let fetched = client.get_glossary_entries(&glossary_id).await.unwrap();
    assert_eq!(fetched, entries);

    client.delete_glossary(&glossary_id).await.unwrap();
}

#[tokio::test]
async fn list_glossaries_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/glossaries"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("glossaries.json")))
        .mount(&mock_server)
        .await;

    let list = client(&mock_server).list_glossaries().await.unwrap();
    assert_eq!(list.glossaries.len(), 2);
    assert_eq!(list.glossaries[1].name, "Legal terms");
    assert!(!list.glossaries[1].ready);
}

#[tokio::test]
async fn get_missing_glossary() {
    let mock_server = MockServer::start().await;
    Mock::given(path("/glossaries/42"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"message":"Glossary not found"}"#),
        )
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .get_glossary(&GlossaryId::from(42u64))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "the requested resource could not be found, message : Glossary not found"
    );
}

#[tokio::test]
async fn glossary_entries_with_invalid_utf8_fail() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/glossaries/7/entries"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"caf\xe9\tKaffee\n".to_vec()))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .get_glossary_entries(&GlossaryId::from(7u64))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DecodeText(_)));
    assert!(err.kind().is_none());
}

#[tokio::test]
async fn document_round_trip() {
    let mock_server = MockServer::start().await;
    let handle = DocumentHandle {
        document_id: "04DE5AD98A02647D83285A36021911C6".to_string(),
        document_key: "0CB0054F1C132C1625B392EADDA41CB754A742822F6877173029A6C487E7F60A".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/document"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "document_id": handle.document_id,
                "document_key": handle.document_key,
            })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/document/{}", handle.document_id)))
        .and(body_json(serde_json::json!({"document_key": handle.document_key})))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("document_status.json")),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/document/{}/result", handle.document_id)))
        .and(header("Accept", "*/*"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"Hallo Welt".to_vec()))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let upload = DocumentUpload::new("hello.txt", b"Hello world".to_vec(), "DE")
        .with_source_lang("EN")
        .with_formality(Formality::More);
    let uploaded = client.upload_document(upload).await.unwrap();
    assert_eq!(uploaded, handle);

    let requests = mock_server.received_requests().await.unwrap();
    let form = String::from_utf8_lossy(&requests[0].body);
    assert!(form.contains("name=\"target_lang\""));
    assert!(form.contains("name=\"formality\"\r\n\r\nmore"));
    assert!(form.contains("filename=\"hello.txt\""));
    assert!(form.contains("Hello world"));

    let status = client.get_document_status(&uploaded).await.unwrap();
    assert_eq!(status.status, Some(DocumentState::Done));
    assert_eq!(status.billed_characters, Some(1337));

    let bytes = client.download_document(&uploaded).await.unwrap();
    assert_eq!(bytes, b"Hallo Welt".to_vec());
}

#[tokio::test]
async fn invalid_base_url_is_reported_before_sending() {
    let client = Client::with_base_url("::not-a-url", "key").unwrap();
    let err = client.get_usage().await.unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
}
