use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use phenix_model::{
    Category, ContactMessage, EmailRecipient, GalleryEntry, GalleryEntryDraft,
    GalleryOrder, NewContactMessage,
};
use tokio::sync::Mutex;

use crate::database::ports::{
    ContactRepository, EmailRecipientRepository, GalleryRepository,
};
use crate::error::Result;

#[derive(Debug, Default)]
struct MemoryState {
    next_entry_id: i32,
    next_message_id: i32,
    next_recipient_id: i32,
    entries: Vec<GalleryEntry>,
    messages: Vec<ContactMessage>,
    recipients: Vec<EmailRecipient>,
}

impl MemoryState {
    fn allocate(counter: &mut i32) -> i32 {
        *counter += 1;
        *counter
    }
}

/// Process-local store implementing every repository port. Used by the demo
/// mode and the test suites.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    state: Arc<Mutex<MemoryState>>,
}

impl fmt::Debug for InMemoryDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("InMemoryDatabase");
        match self.state.try_lock() {
            Ok(state) => {
                debug
                    .field("entries", &state.entries.len())
                    .field("messages", &state.messages.len())
                    .field("recipients", &state.recipients.len());
            }
            Err(_) => {
                debug.field("state", &"<locked>");
            }
        }
        debug.finish()
    }
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GalleryRepository for InMemoryDatabase {
    async fn list(
        &self,
        category: Category,
        order: GalleryOrder,
    ) -> Result<Vec<GalleryEntry>> {
        let state = self.state.lock().await;
        let mut entries: Vec<GalleryEntry> = state
            .entries
            .iter()
            .filter(|entry| entry.category == category)
            .cloned()
            .collect();
        match order {
            GalleryOrder::IdAscending => entries.sort_by_key(|entry| entry.id),
            GalleryOrder::NewestFirst => entries.sort_by(|a, b| {
                b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
            }),
        }
        Ok(entries)
    }

    async fn find(
        &self,
        id: i32,
        category: Category,
    ) -> Result<Option<GalleryEntry>> {
        let state = self.state.lock().await;
        Ok(state
            .entries
            .iter()
            .find(|entry| entry.id == id && entry.category == category)
            .cloned())
    }

    async fn create(
        &self,
        category: Category,
        draft: GalleryEntryDraft,
    ) -> Result<GalleryEntry> {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        let entry = GalleryEntry {
            id: MemoryState::allocate(&mut state.next_entry_id),
            title: draft.title,
            description: draft.description,
            category,
            images: draft.images,
            created_at: now,
            updated_at: now,
        };
        state.entries.push(entry.clone());
        Ok(entry)
    }

    async fn update(
        &self,
        id: i32,
        category: Category,
        draft: GalleryEntryDraft,
    ) -> Result<Option<GalleryEntry>> {
        let mut state = self.state.lock().await;
        let Some(entry) = state
            .entries
            .iter_mut()
            .find(|entry| entry.id == id && entry.category == category)
        else {
            return Ok(None);
        };

        entry.title = draft.title;
        entry.description = draft.description;
        entry.images = draft.images;
        entry.updated_at = Utc::now();
        Ok(Some(entry.clone()))
    }

    async fn delete(&self, id: i32, category: Category) -> Result<bool> {
        let mut state = self.state.lock().await;
        let before = state.entries.len();
        state
            .entries
            .retain(|entry| !(entry.id == id && entry.category == category));
        Ok(state.entries.len() != before)
    }

    async fn count(&self, category: Category) -> Result<i64> {
        let state = self.state.lock().await;
        let total = state
            .entries
            .iter()
            .filter(|entry| entry.category == category)
            .count();
        Ok(total as i64)
    }
}

#[async_trait]
impl ContactRepository for InMemoryDatabase {
    async fn create(&self, message: NewContactMessage) -> Result<ContactMessage> {
        let mut state = self.state.lock().await;
        let stored = ContactMessage {
            id: MemoryState::allocate(&mut state.next_message_id),
            name: message.name,
            email: message.email,
            phone: message.phone,
            subject: message.subject,
            message: message.message,
            ip_address: message.ip_address,
            user_agent: message.user_agent,
            created_at: Utc::now(),
        };
        state.messages.push(stored.clone());
        Ok(stored)
    }

    async fn list_newest_first(&self) -> Result<Vec<ContactMessage>> {
        let state = self.state.lock().await;
        let mut messages = state.messages.clone();
        messages.sort_by(|a, b| {
            b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
        });
        Ok(messages)
    }
}

#[async_trait]
impl EmailRecipientRepository for InMemoryDatabase {
    async fn active_recipient(&self) -> Result<Option<EmailRecipient>> {
        let state = self.state.lock().await;
        Ok(state
            .recipients
            .iter()
            .filter(|recipient| recipient.is_active)
            .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
            .cloned())
    }

    async fn ensure_default(&self, email: &str) -> Result<EmailRecipient> {
        let mut state = self.state.lock().await;
        if let Some(existing) = state.recipients.first() {
            return Ok(existing.clone());
        }

        let recipient = EmailRecipient {
            id: MemoryState::allocate(&mut state.next_recipient_id),
            email: email.to_string(),
            is_active: true,
            created_at: Utc::now(),
        };
        state.recipients.push(recipient.clone());
        Ok(recipient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> GalleryEntryDraft {
        GalleryEntryDraft {
            title: title.into(),
            description: "Fer forgé".into(),
            images: vec!["a.jpg".into()],
        }
    }

    #[tokio::test]
    async fn entries_are_scoped_to_their_category() {
        let db = InMemoryDatabase::new();
        let art = GalleryRepository::create(&db, Category::Art, draft("Aigle"))
            .await
            .expect("create");

        assert!(db.find(art.id, Category::Fittings).await.expect("find").is_none());
        assert!(!db.delete(art.id, Category::Fittings).await.expect("delete"));
        assert!(
            db.update(art.id, Category::Fittings, draft("Autre"))
                .await
                .expect("update")
                .is_none()
        );
        assert_eq!(db.count(Category::Art).await.expect("count"), 1);
    }

    #[tokio::test]
    async fn listing_orders() {
        let db = InMemoryDatabase::new();
        for title in ["Premier", "Second", "Troisième"] {
            GalleryRepository::create(&db, Category::Art, draft(title))
                .await
                .expect("create");
        }

        let by_id = db
            .list(Category::Art, GalleryOrder::IdAscending)
            .await
            .expect("list");
        let newest = db
            .list(Category::Art, GalleryOrder::NewestFirst)
            .await
            .expect("list");

        let ids = |entries: &[GalleryEntry]| {
            entries.iter().map(|entry| entry.id).collect::<Vec<_>>()
        };
        assert_eq!(ids(&by_id), vec![1, 2, 3]);
        assert_eq!(ids(&newest), vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn update_refreshes_timestamp() {
        let db = InMemoryDatabase::new();
        let created = GalleryRepository::create(&db, Category::Fittings, draft("Portail"))
            .await
            .expect("create");
        let updated = db
            .update(created.id, Category::Fittings, draft("Portail Noir"))
            .await
            .expect("update")
            .expect("present");

        assert_eq!(updated.title, "Portail Noir");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn default_recipient_is_created_once() {
        let db = InMemoryDatabase::new();
        assert!(db.active_recipient().await.expect("lookup").is_none());

        let first = db.ensure_default("contact@example.fr").await.expect("ensure");
        let second = db.ensure_default("autre@example.fr").await.expect("ensure");
        assert_eq!(first, second);
        assert_eq!(
            db.active_recipient().await.expect("lookup").map(|r| r.email),
            Some("contact@example.fr".to_string())
        );
    }
}
