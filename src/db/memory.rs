//! In-memory contact store for tests. Counts every call so tests can assert
//! that a request never reached storage.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;

use super::ContactStore;
use crate::errors::AppError;
use crate::models::{
    new_contact_id, Contact, ContactSummary, CreateContactRequest, UpdateContactRequest,
};

#[derive(Default)]
pub struct MemoryContactStore {
    contacts: RwLock<Vec<Contact>>,
    calls: AtomicUsize,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations invoked so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl ContactStore for MemoryContactStore {
    async fn list(&self) -> Result<Vec<ContactSummary>, AppError> {
        self.record_call();
        let contacts = self.contacts.read().await;
        Ok(contacts.iter().cloned().map(ContactSummary::from).collect())
    }

    async fn get_by_id<'a>(&'a self, id: &'a str) -> Result<Option<Contact>, AppError> {
        self.record_call();
        let contacts = self.contacts.read().await;
        Ok(contacts.iter().find(|c| c.id == id).cloned())
    }

    async fn create<'a>(&'a self, request: &'a CreateContactRequest) -> Result<Contact, AppError> {
        self.record_call();
        let now = Utc::now().to_rfc3339();
        let contact = Contact {
            id: new_contact_id(),
            name: request.name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            favorite: request.favorite,
            created_at: now.clone(),
            updated_at: now,
        };
        self.contacts.write().await.push(contact.clone());
        Ok(contact)
    }

    async fn update_by_id<'a>(
        &'a self,
        id: &'a str,
        request: &'a UpdateContactRequest,
    ) -> Result<Option<Contact>, AppError> {
        self.record_call();
        let mut contacts = self.contacts.write().await;
        let Some(contact) = contacts.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        merge(contact, request);
        contact.updated_at = Utc::now().to_rfc3339();
        Ok(Some(contact.clone()))
    }

    async fn delete_by_id<'a>(&'a self, id: &'a str) -> Result<Option<Contact>, AppError> {
        self.record_call();
        let mut contacts = self.contacts.write().await;
        let position = contacts.iter().position(|c| c.id == id);
        Ok(position.map(|index| contacts.remove(index)))
    }
}

fn merge(contact: &mut Contact, request: &UpdateContactRequest) {
    if let Some(name) = &request.name {
        contact.name = name.clone();
    }
    if let Some(email) = &request.email {
        contact.email = Some(email.clone());
    }
    if let Some(phone) = &request.phone {
        contact.phone = Some(phone.clone());
    }
    if let Some(favorite) = request.favorite {
        contact.favorite = favorite;
    }
}
