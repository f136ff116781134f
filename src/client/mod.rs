//! Typed client for the relay, and the dashboard state driven through it.
//!
//! [`Dashboard`] holds the same per-session state as the browser page: form
//! values, the last report, a loading flag, an error message and the contact
//! list. Nothing here is persisted.

use log::debug;
use log::info;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::json;
use wreq::Client;
use wreq::Method;
use wreq::header::CONTENT_TYPE;

use crate::client::error::ClientError;
use crate::model::Contact;
use crate::model::ContactId;
use crate::model::ContactList;
use crate::model::ErrorBody;
use crate::model::Frequency;
use crate::model::ReportRequest;
use crate::model::ReportResult;
use crate::server::CONTACTS_PATH;
use crate::server::WORKFLOW_PATH;

pub mod error;

const FALLBACK_ERROR: &str = "Failed to generate rental market report";

/// Thin HTTP client for the relay routes.
#[derive(Clone)]
pub struct RelayClient {
    client: Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn trigger_report(&self, request: &ReportRequest) -> Result<ReportResult, ClientError> {
        self.send(Method::POST, WORKFLOW_PATH, Some(request)).await
    }

    pub async fn list_contacts(&self) -> Result<Vec<Contact>, ClientError> {
        let list: ContactList = self.send::<(), _>(Method::GET, CONTACTS_PATH, None).await?;
        Ok(list.contacts)
    }

    pub async fn add_contact(&self, contact: &Contact) -> Result<Value, ClientError> {
        self.send(Method::POST, CONTACTS_PATH, Some(contact)).await
    }

    pub async fn update_contact(&self, contact: &Contact) -> Result<Value, ClientError> {
        self.send(Method::PUT, CONTACTS_PATH, Some(contact)).await
    }

    pub async fn delete_contact(&self, id: &ContactId) -> Result<Value, ClientError> {
        self.send(Method::DELETE, CONTACTS_PATH, Some(&json!({ "id": id })))
            .await
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        debug!("{method} {url}");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_string(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.message().to_string())
                .unwrap_or_else(|_| FALLBACK_ERROR.to_string());
            return Err(ClientError::Relay {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Per-session dashboard state.
pub struct Dashboard {
    client: RelayClient,
    pub frequency: Frequency,
    pub custom_message: String,
    result: Option<ReportResult>,
    loading: bool,
    error: Option<String>,
    contacts: Vec<Contact>,
}

impl Dashboard {
    pub fn new(client: RelayClient) -> Self {
        Self {
            client,
            frequency: Frequency::default(),
            custom_message: String::new(),
            result: None,
            loading: false,
            error: None,
            contacts: Vec::new(),
        }
    }

    pub fn result(&self) -> Option<&ReportResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// The request the form would submit; a blank message is left out.
    pub fn report_request(&self) -> ReportRequest {
        let message = self.custom_message.trim();
        ReportRequest {
            frequency: self.frequency,
            custom_message: (!message.is_empty()).then(|| message.to_string()),
        }
    }

    /// Submits the report form. Ignored while a submission is in flight.
    pub async fn submit_report(&mut self) {
        if self.loading {
            return;
        }
        self.loading = true;
        self.error = None;
        self.result = None;

        let request = self.report_request();
        match self.client.trigger_report(&request).await {
            Ok(result) => {
                info!(
                    "Report generated, {} email(s) sent",
                    result.emails_sent.unwrap_or(0)
                );
                self.result = Some(result);
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        self.loading = false;
    }

    /// Clears the last report so another one can be generated.
    pub fn reset_report(&mut self) {
        self.result = None;
        self.custom_message.clear();
    }

    /// Re-fetches the contact list. Failures leave an empty list and no error,
    /// since contact management may simply not be set up.
    pub async fn refresh_contacts(&mut self) {
        match self.client.list_contacts().await {
            Ok(contacts) => self.contacts = contacts,
            Err(e) => {
                debug!("Contact list unavailable: {e}");
                self.contacts.clear();
            }
        }
    }

    pub async fn add_contact(&mut self, contact: &Contact) -> Result<(), ClientError> {
        let outcome = self.client.add_contact(contact).await;
        self.refresh_contacts().await;
        outcome.map(|_| ())
    }

    pub async fn update_contact(&mut self, contact: &Contact) -> Result<(), ClientError> {
        let outcome = self.client.update_contact(contact).await;
        self.refresh_contacts().await;
        outcome.map(|_| ())
    }

    pub async fn delete_contact(&mut self, id: &ContactId) -> Result<(), ClientError> {
        let outcome = self.client.delete_contact(id).await;
        self.refresh_contacts().await;
        outcome.map(|_| ())
    }
}
