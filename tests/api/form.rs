use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::FirstName;
use fake::Fake;
use rsvp::domain::EMAIL_FORMAT_MSG;
use rsvp::domain::NAME_REQUIRED_MSG;
use rsvp::domain::PHONE_REQUIRED_MSG;

use crate::helpers::spawn_app;

#[tokio::test]
async fn empty_form() {
    let app = spawn_app().await;
    let resp = app.get("/form").await;
    assert_eq!(resp.status().as_u16(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains(r#"action="/form""#));
    assert!(html.contains(r#"name="willattend""#));
    assert!(!html.contains(r#"class="errors""#));
}

/// POST {name:"Ann", email:"a@b.com", phone:"555", willattend:"true"}
#[tokio::test]
async fn attending_guest() {
    let app = spawn_app().await;
    let resp = app.post_rsvp("Ann", "a@b.com", "555", "true").await;
    assert_eq!(resp.status().as_u16(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Thank you, Ann!"));
    assert!(html.contains("great that you're coming"));

    let guests = app.guests.snapshot();
    assert_eq!(guests.len(), 1);
    assert_eq!(guests[0].name, "Ann");
    assert_eq!(guests[0].email.as_ref(), "a@b.com");
    assert_eq!(guests[0].phone, "555");
    assert!(guests[0].will_attend);

    let lines = app.log_lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Ann a@b.com 555 created_at: "), "{}", lines[0]);
}

#[tokio::test]
async fn declining_guest() {
    let app = spawn_app().await;
    let resp = app.post_rsvp("Bob", "bob@foo.com", "123", "false").await;
    assert_eq!(resp.status().as_u16(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Thank you, Bob!"));
    assert!(html.contains("can't make it"));

    // stored, but not logged
    assert_eq!(app.guests.len(), 1);
    assert!(!app.guests.snapshot()[0].will_attend);
    assert!(app.log_lines().is_empty());
}

#[tokio::test]
async fn log_gets_one_line_per_attending_guest() {
    let app = spawn_app().await;
    app.post_rsvp("Ann", "ann@foo.com", "1", "true").await;
    app.post_rsvp("Bob", "bob@foo.com", "2", "false").await;
    app.post_rsvp("Cat", "cat@foo.com", "3", "true").await;

    let lines = app.log_lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Ann ann@foo.com 1 "));
    assert!(lines[1].starts_with("Cat cat@foo.com 3 "));
    assert_eq!(app.guests.len(), 3);
}

/// POST {name:"", email:"bad", phone:"555", willattend:"false"}
#[tokio::test]
async fn malformed_email() {
    let app = spawn_app().await;
    let resp = app.post_rsvp("", "bad", "555", "false").await;
    assert_eq!(resp.status().as_u16(), 200);
    let html = resp.text().await.unwrap();

    assert!(html.contains(EMAIL_FORMAT_MSG));
    // the name check never ran
    assert!(!html.contains(NAME_REQUIRED_MSG));
    // submitted values are kept in the form
    assert!(html.contains(r#"value="bad""#));
    assert!(html.contains(r#"value="555""#));

    assert!(app.guests.is_empty());
    assert!(app.log_lines().is_empty());
}

#[tokio::test]
async fn any_malformed_email_adds_nothing() {
    let app = spawn_app().await;
    for email in [
        "",
        "bad",
        "annfoo.com",
        "@foo.com",
        "ann@",
        "a b@c.com",
        "a..b@c.com",
        ".a@c.com",
    ] {
        let html = app
            .post_rsvp("Ann", email, "555", "true")
            .await
            .text()
            .await
            .unwrap();
        assert!(html.contains(EMAIL_FORMAT_MSG), "{email}");
    }
    assert!(app.guests.is_empty());
}

#[tokio::test]
async fn empty_name() {
    let app = spawn_app().await;
    let html = app
        .post_rsvp("", "a@b.com", "555", "true")
        .await
        .text()
        .await
        .unwrap();
    assert!(html.contains(NAME_REQUIRED_MSG));
    assert!(!html.contains(EMAIL_FORMAT_MSG));
    assert!(!html.contains(PHONE_REQUIRED_MSG));
    assert!(app.guests.is_empty());
}

#[tokio::test]
async fn empty_name_and_phone() {
    let app = spawn_app().await;
    let html = app
        .post_rsvp("", "a@b.com", "", "true")
        .await
        .text()
        .await
        .unwrap();
    let name_at = html.find(NAME_REQUIRED_MSG).unwrap();
    let phone_at = html.find(PHONE_REQUIRED_MSG).unwrap();
    assert!(name_at < phone_at);
    assert!(app.guests.is_empty());
}

#[tokio::test]
async fn missing_fields_are_treated_as_empty() {
    let app = spawn_app().await;
    let resp = app.post_form("email=a%40b.com".to_owned()).await;
    assert_eq!(resp.status().as_u16(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains(NAME_REQUIRED_MSG));
    assert!(html.contains(PHONE_REQUIRED_MSG));
    assert!(app.guests.is_empty());
}

#[tokio::test]
async fn submitted_values_are_escaped() {
    let app = spawn_app().await;
    let html = app
        .post_rsvp(r#""><script>alert(1)</script>"#, "bad", "555", "true")
        .await
        .text()
        .await
        .unwrap();
    assert!(!html.contains("<script>"));
}

#[tokio::test]
async fn each_valid_submission_adds_exactly_one_entry() {
    let app = spawn_app().await;
    for i in 0..10 {
        let name: String = FirstName().fake();
        let email: String = SafeEmail().fake();
        let phone = format!("555-{i:04}");
        app.post_rsvp(&name, &email, &phone, "true").await;

        let guests = app.guests.snapshot();
        assert_eq!(guests.len(), i + 1);
        let last = guests.last().unwrap();
        assert_eq!(last.name, name);
        assert_eq!(last.email.as_ref(), email);
        assert_eq!(last.phone, phone);
    }
}

#[tokio::test]
async fn concurrent_submissions_are_all_kept() {
    let app = spawn_app().await;
    let mut handles = vec![];
    for i in 0..20 {
        let client = app.client.clone();
        let url = format!("{}/form", app.addr);
        let body = format!("name=guest{i}&email=guest{i}%40foo.com&phone=555&willattend=true");
        handles.push(tokio::spawn(async move {
            client
                .post(url)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(body)
                .send()
                .await
                .expect("execute request")
        }));
    }
    for h in handles {
        assert_eq!(h.await.unwrap().status().as_u16(), 200);
    }
    assert_eq!(app.guests.len(), 20);
    assert_eq!(app.log_lines().len(), 20);
}
