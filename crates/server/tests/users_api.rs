mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};

use common::{build_app, TestApp};

async fn create_profile(app: &TestApp, email: &str, first: &str, extra: Value) -> anyhow::Result<i64> {
    let mut body = json!({"email": email, "firstName": first, "lastName": "Lovelace"});
    if let (Some(obj), Some(more)) = (body.as_object_mut(), extra.as_object()) {
        obj.extend(more.clone());
    }
    let (status, created) = app.post("/api/v1/users", body).await?;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    Ok(created["id"].as_i64().unwrap())
}

fn multipart(uri: &str, file_name: &str, bytes: &[u8]) -> anyhow::Result<Request<Body>> {
    let boundary = "networkpro-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n").as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    Ok(Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))?)
}

#[tokio::test]
async fn test_profile_crud() -> anyhow::Result<()> {
    let app = build_app().await?;
    let id = create_profile(&app, "ada@example.com", "Ada", json!({"headline": "Engineer"})).await?;

    let (status, body) = app.get(&format!("/api/v1/users/{id}")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstName"], "Ada");
    assert_eq!(body["lastName"], "Lovelace");
    assert_eq!(body["headline"], "Engineer");

    let (status, body) = app.get("/api/v1/users/email/ada@example.com").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"].as_i64(), Some(id));

    let (status, body) = app
        .put(&format!("/api/v1/users/{id}"), json!({"firstName": "Augusta", "lastName": "King", "location": "London"}))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstName"], "Augusta");
    assert_eq!(body["location"], "London");
    assert_eq!(body["headline"], "Engineer");

    let (status, body) = app.put(&format!("/api/v1/users/{id}"), json!({"firstName": "", "lastName": "King"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "First name is required");

    assert_eq!(app.delete(&format!("/api/v1/users/{id}")).await?, StatusCode::NO_CONTENT);
    let (status, body) = app.get(&format!("/api/v1/users/{id}")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User profile not found");
    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_and_create_or_get() -> anyhow::Result<()> {
    let app = build_app().await?;
    create_profile(&app, "ada@example.com", "Ada", json!({})).await?;

    let (status, body) = app
        .post("/api/v1/users", json!({"email": "ada@example.com", "firstName": "A", "lastName": "B"}))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "A profile with this email already exists");

    let (status, first) = app.send("POST", "/api/v1/users/email/new@example.com", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["profilePublic"], false);
    let (_, again) = app.send("POST", "/api/v1/users/email/new@example.com", None, None).await?;
    assert_eq!(first["id"], again["id"]);

    let (status, _) = app.get(&format!("/api/v1/users/{}/public", first["id"])).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_search_endpoints() -> anyhow::Result<()> {
    let app = build_app().await?;
    create_profile(&app, "a@example.com", "Ada", json!({"location": "London", "currentCompany": "Analytical Engines", "industry": "Computing", "skills": ["Rust", "Math"]})).await?;
    create_profile(&app, "g@example.com", "Grace", json!({"location": "New York", "currentCompany": "Navy", "skills": ["COBOL"]})).await?;

    let (_, body) = app.send("POST", "/api/v1/users/search?keyword=ada&location=lon", None, None).await?;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = app.post("/api/v1/users/search/skills", json!(["cobol", "rust"])).await?;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/users/search/location")
        .header("content-type", "text/plain")
        .body(Body::from("\"new york\""))?;
    let (status, body) = app.call(req).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["firstName"], "Grace");

    let req = Request::builder().method("POST").uri("/api/v1/users/search/company").body(Body::from("analytical"))?;
    let (_, body) = app.call(req).await?;
    assert_eq!(body[0]["firstName"], "Ada");

    let (_, body) = app.get("/api/v1/users/public").await?;
    assert_eq!(body.as_array().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_privacy_settings() -> anyhow::Result<()> {
    let app = build_app().await?;
    let id = create_profile(&app, "a@example.com", "Ada", json!({})).await?;

    let settings = json!({
        "profileVisible": false,
        "showEmail": false,
        "showPhone": true,
        "showWorkExperience": true,
        "showEducation": false,
        "showCertifications": true
    });
    let (status, body) = app.put(&format!("/api/v1/users/{id}/privacy-settings"), settings).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profileVisible"], false);
    assert_eq!(body["showEmail"], true);
    assert_eq!(body["showPhone"], true);
    assert_eq!(body["showEducation"], false);

    let (_, profile) = app.get(&format!("/api/v1/users/{id}")).await?;
    assert_eq!(profile["profilePublic"], false);
    assert_eq!(profile["contactInfoPublic"], true);
    Ok(())
}

#[tokio::test]
async fn test_completion_tracks_uploads_and_experience() -> anyhow::Result<()> {
    let app = build_app().await?;
    let id = create_profile(&app, "a@example.com", "Ada", json!({"summary": "First programmer", "location": "London", "skills": ["Math"]})).await?;

    let (_, body) = app.get(&format!("/api/v1/users/{id}/completion")).await?;
    assert_eq!(body["completionPercentage"], 55);
    assert_eq!(body["isComplete"], false);
    let missing: Vec<&str> = body["missingFields"].as_array().unwrap().iter().filter_map(Value::as_str).collect();
    assert!(missing.contains(&"profilePicture"));
    assert!(missing.contains(&"education"));

    let (status, body) = app.call(multipart(&format!("/api/v1/users/{id}/profile-picture"), "me.png", b"\x89PNG")?).await?;
    assert_eq!(status, StatusCode::OK, "{body}");
    let url = body["url"].as_str().unwrap().to_string();
    assert!(url.starts_with(&format!("/uploads/profile-pictures/{id}/")));
    assert!(url.ends_with(".png"));
    let stored = app.uploads.path().join(url.trim_start_matches("/uploads/"));
    assert!(stored.exists());

    let (status, _) = app
        .post(&format!("/api/v1/users/{id}/work-experience"), json!({"title": "Analyst", "company": "Engines", "startDate": "1843-01-01"}))
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = app.get(&format!("/api/v1/users/{id}/completion")).await?;
    assert_eq!(body["completionPercentage"], 80);
    assert_eq!(body["isComplete"], true);

    let (_, body) = app.get("/api/v1/users/completion/79").await?;
    assert_eq!(body.as_array().unwrap().len(), 1);

    assert_eq!(app.delete(&format!("/api/v1/users/{id}/profile-picture")).await?, StatusCode::NO_CONTENT);
    assert!(!stored.exists());
    let (_, body) = app.get(&format!("/api/v1/users/{id}")).await?;
    assert!(body["profilePictureUrl"].is_null());
    Ok(())
}

#[tokio::test]
async fn test_upload_requires_file_field() -> anyhow::Result<()> {
    let app = build_app().await?;
    let id = create_profile(&app, "a@example.com", "Ada", json!({})).await?;
    let boundary = "b";
    let body = format!("--{boundary}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nx\r\n--{boundary}--\r\n");
    let req = Request::builder()
        .method("POST")
        .uri(format!("/api/v1/users/{id}/banner-image"))
        .header("content-type", format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))?;
    let (status, body) = app.call(req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "File is required");
    Ok(())
}

#[tokio::test]
async fn test_nested_collections_are_scoped() -> anyhow::Result<()> {
    let app = build_app().await?;
    let ada = create_profile(&app, "a@example.com", "Ada", json!({})).await?;
    let grace = create_profile(&app, "g@example.com", "Grace", json!({})).await?;

    let (status, edu) = app
        .post(
            &format!("/api/v1/users/{ada}/education"),
            json!({"institution": "University of London", "degree": "BSc", "fieldOfStudy": "Mathematics", "startDate": "1840-09-01"}),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED, "{edu}");
    let edu_id = edu["id"].as_i64().unwrap();

    let (status, _) = app.get(&format!("/api/v1/users/{grace}/education/{edu_id}")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, found) = app.get(&format!("/api/v1/users/{ada}/education/degree/bsc")).await?;
    assert_eq!(found.as_array().unwrap().len(), 1);

    let (status, cert) = app
        .post(
            &format!("/api/v1/users/{ada}/certifications"),
            json!({"name": "Rust", "issuingOrganization": "Ferris", "issueDate": "2020-01-01", "expiryDate": "2021-01-01"}),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED, "{cert}");
    let cert_id = cert["id"].as_i64().unwrap();

    let (_, expired) = app.get(&format!("/api/v1/users/{ada}/certifications/expired")).await?;
    assert_eq!(expired.as_array().unwrap().len(), 1);

    let (status, body) = app
        .send("PUT", &format!("/api/v1/users/{ada}/certifications/{cert_id}/renew?expirationDate=2019-01-01"), None, None)
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Expiration date must not be before issue date");

    let (status, renewed) = app
        .send("PUT", &format!("/api/v1/users/{ada}/certifications/{cert_id}/renew?expirationDate=2999-01-01"), None, None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renewed["expiryDate"], "2999-01-01");
    let (_, valid) = app.get(&format!("/api/v1/users/{ada}/certifications/valid")).await?;
    assert_eq!(valid.as_array().unwrap().len(), 1);

    let (_, work) = app
        .post(&format!("/api/v1/users/{ada}/work-experience"), json!({"title": "Analyst", "company": "Engines", "startDate": "1843-01-01", "isCurrentPosition": true}))
        .await?;
    let work_id = work["id"].as_i64().unwrap();
    let (status, ended) = app
        .send("PUT", &format!("/api/v1/users/{ada}/work-experience/{work_id}/end-position?endDate=1850-06-30"), None, None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ended["isCurrentPosition"], false);
    let (_, current) = app.get(&format!("/api/v1/users/{ada}/work-experience/current")).await?;
    assert!(current.as_array().unwrap().is_empty());

    // deleting the profile takes its collections with it
    assert_eq!(app.delete(&format!("/api/v1/users/{ada}")).await?, StatusCode::NO_CONTENT);
    let (status, _) = app.get(&format!("/api/v1/users/{ada}/certifications/{cert_id}")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
