use chrono::{TimeZone, Utc};
use phenix_core::{
    database::{DatabaseContext, InMemoryDatabase, seed},
    mail::ContactNotification,
};
use phenix_model::{Category, GalleryOrder, NewContactMessage};

#[tokio::test]
async fn seeded_store_serves_both_galleries() {
    let db = DatabaseContext::in_memory(InMemoryDatabase::new());

    let report = seed::seed_database(&db).await.expect("seed");
    assert!(report.inserted > 0);
    assert!(report.skipped_categories.is_empty());
    assert_eq!(report.recipient, seed::DEFAULT_RECIPIENT);

    for category in Category::ALL {
        let entries = db
            .gallery()
            .list(category, GalleryOrder::IdAscending)
            .await
            .expect("list");
        assert!(!entries.is_empty(), "{category} has seeded entries");
        assert!(entries.iter().all(|entry| entry.category == category));
        assert!(entries.iter().all(|entry| !entry.images.is_empty()));
    }

    let again = seed::seed_database(&db).await.expect("reseed");
    assert_eq!(again.inserted, 0);
    assert_eq!(again.skipped_categories.len(), Category::ALL.len());
}

#[tokio::test]
async fn stored_contact_renders_a_notification() {
    let db = DatabaseContext::in_memory(InMemoryDatabase::new());
    let recipient = db
        .recipients()
        .ensure_default("atelier@example.fr")
        .await
        .expect("recipient");

    let stored = db
        .contacts()
        .create(NewContactMessage::normalized(
            "Paul",
            "Paul@Example.fr",
            Some("  "),
            "Rampe d'escalier",
            "Bonjour, pouvez-vous me rappeler ?",
            "198.51.100.4",
            None,
        ))
        .await
        .expect("store");
    assert_eq!(stored.phone, None);

    let received_at = Utc
        .with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
        .single()
        .expect("timestamp");
    let email = ContactNotification::new(&stored, received_at)
        .into_email(&recipient.email, "site@example.fr");

    assert_eq!(email.to, "atelier@example.fr");
    assert_eq!(email.reply_to.as_deref(), Some("paul@example.fr"));
    assert!(email.html.contains("Rampe d&#39;escalier"));
    assert!(email.html.contains("14/03/2025 09:30:00"));
    assert!(email.text.contains(&format!("ID du contact: {}", stored.id)));
}
