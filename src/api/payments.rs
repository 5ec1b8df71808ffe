use std::sync::Arc;

use serde::Serialize;

use crate::api::messages::SendOptions;
use crate::api::r#trait::{BotApi, BotContext};
use crate::error::TelegramError;
use crate::types::{ChatId, LabeledPrice, Message, ShippingOption};
use crate::utils::{check_count, check_len, check_non_empty};

/// Payments in Telegram Stars use this currency and no provider token.
pub const STARS_CURRENCY: &str = "XTR";

/// Invoice fields shared by sendInvoice and createInvoiceLink
#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceDetails {
    /// 1-32 characters
    pub title: String,
    /// 1-255 characters
    pub description: String,
    /// Bot-defined payload, 1-128 bytes, not shown to the user
    pub payload: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_token: Option<String>,
    /// ISO 4217 code or `XTR`
    pub currency: String,
    pub prices: Vec<LabeledPrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tip_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_tip_amounts: Option<Vec<i64>>,
    /// JSON data passed to the payment provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_name: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_phone_number: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_email: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_shipping_address: Option<bool>,
    /// Final price depends on the shipping method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_flexible: Option<bool>,
}

impl InvoiceDetails {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        payload: impl Into<String>,
        currency: impl Into<String>,
        prices: Vec<LabeledPrice>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            payload: payload.into(),
            provider_token: None,
            currency: currency.into(),
            prices,
            max_tip_amount: None,
            suggested_tip_amounts: None,
            provider_data: None,
            photo_url: None,
            need_name: None,
            need_phone_number: None,
            need_email: None,
            need_shipping_address: None,
            is_flexible: None,
        }
    }

    pub fn provider_token(mut self, provider_token: impl Into<String>) -> Self {
        self.provider_token = Some(provider_token.into());
        self
    }

    pub fn tips(mut self, max_tip_amount: i64, suggested_tip_amounts: Vec<i64>) -> Self {
        self.max_tip_amount = Some(max_tip_amount);
        self.suggested_tip_amounts = Some(suggested_tip_amounts);
        self
    }

    pub fn flexible(mut self) -> Self {
        self.is_flexible = Some(true);
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        check_len("title", &self.title, 1, 32)?;
        check_len("description", &self.description, 1, 255)?;
        if self.payload.is_empty() || self.payload.len() > 128 {
            return Err(TelegramError::validation(format!(
                "payload must be 1-128 bytes, got {}",
                self.payload.len()
            )));
        }
        check_non_empty("prices", self.prices.len())?;
        if self.currency == STARS_CURRENCY && self.prices.len() != 1 {
            return Err(TelegramError::validation(
                "payments in Telegram Stars take exactly one price",
            ));
        }
        if let Some(tips) = &self.suggested_tip_amounts {
            check_count("suggested_tip_amounts", tips.len(), 0, 4)?;
            let max = self.max_tip_amount.unwrap_or(0);
            let ascending = tips.windows(2).all(|pair| pair[0] < pair[1]);
            if !ascending || tips.iter().any(|&tip| tip <= 0 || tip > max) {
                return Err(TelegramError::validation(
                    "suggested_tip_amounts must be positive, increasing and at most max_tip_amount",
                ));
            }
        }
        Ok(())
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SendInvoiceRequest {
    pub chat_id: ChatId,
    #[serde(flatten)]
    pub invoice: InvoiceDetails,
    /// Deep-linking parameter; unset lets forwarded copies be paid too
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_parameter: Option<String>,
    #[serde(flatten)]
    pub options: SendOptions,
}

impl SendInvoiceRequest {
    pub fn new(chat_id: impl Into<ChatId>, invoice: InvoiceDetails) -> Self {
        Self {
            chat_id: chat_id.into(),
            invoice,
            start_parameter: None,
            options: SendOptions::default(),
        }
    }
}

/// Outcome of a shipping query
#[derive(Debug, Clone, PartialEq)]
pub enum ShippingAnswer {
    Ok(Vec<ShippingOption>),
    /// Delivery is impossible; the message is shown to the user
    Error(String),
}

/// Outcome of a pre-checkout query
#[derive(Debug, Clone, PartialEq)]
pub enum PreCheckoutAnswer {
    Ok,
    Error(String),
}

#[derive(Debug, Serialize)]
struct AnswerShippingQueryBody<'a> {
    shipping_query_id: &'a str,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping_options: Option<&'a [ShippingOption]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct AnswerPreCheckoutQueryBody<'a> {
    pre_checkout_query_id: &'a str,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<&'a str>,
}

/// Invoices and payment query answers
pub struct PaymentsApi {
    context: Arc<BotContext>,
}

impl PaymentsApi {
    pub fn new(context: Arc<BotContext>) -> Self {
        Self { context }
    }

    /// POST sendInvoice
    pub async fn send_invoice(
        &self,
        request: &SendInvoiceRequest,
    ) -> Result<Message, TelegramError> {
        request.invoice.validate()?;
        request.options.validate()?;
        self.context.client.post("sendInvoice", request).await
    }

    /// POST createInvoiceLink
    pub async fn create_invoice_link(
        &self,
        invoice: &InvoiceDetails,
    ) -> Result<String, TelegramError> {
        invoice.validate()?;
        self.context.client.post("createInvoiceLink", invoice).await
    }

    /// Reply within 10 seconds of receiving the shipping query.
    ///
    /// POST answerShippingQuery
    pub async fn answer_shipping_query(
        &self,
        shipping_query_id: &str,
        answer: &ShippingAnswer,
    ) -> Result<bool, TelegramError> {
        let body = match answer {
            ShippingAnswer::Ok(options) => {
                check_non_empty("shipping_options", options.len())?;
                AnswerShippingQueryBody {
                    shipping_query_id,
                    ok: true,
                    shipping_options: Some(options.as_slice()),
                    error_message: None,
                }
            }
            ShippingAnswer::Error(message) => {
                check_non_empty("error_message", message.len())?;
                AnswerShippingQueryBody {
                    shipping_query_id,
                    ok: false,
                    shipping_options: None,
                    error_message: Some(message.as_str()),
                }
            }
        };
        self.context.client.post("answerShippingQuery", &body).await
    }

    /// Reply within 10 seconds of receiving the pre-checkout query.
    ///
    /// POST answerPreCheckoutQuery
    pub async fn answer_pre_checkout_query(
        &self,
        pre_checkout_query_id: &str,
        answer: &PreCheckoutAnswer,
    ) -> Result<bool, TelegramError> {
        let body = match answer {
            PreCheckoutAnswer::Ok => AnswerPreCheckoutQueryBody {
                pre_checkout_query_id,
                ok: true,
                error_message: None,
            },
            PreCheckoutAnswer::Error(message) => {
                check_non_empty("error_message", message.len())?;
                AnswerPreCheckoutQueryBody {
                    pre_checkout_query_id,
                    ok: false,
                    error_message: Some(message.as_str()),
                }
            }
        };
        self.context
            .client
            .post("answerPreCheckoutQuery", &body)
            .await
    }
}

impl BotApi for PaymentsApi {
    fn api_name(&self) -> &'static str {
        "payments"
    }

    fn context(&self) -> &BotContext {
        &self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{method_path, ok, test_context};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer};

    fn stars_invoice() -> InvoiceDetails {
        InvoiceDetails::new(
            "Crab plushie",
            "A soft Ferris",
            "order-17",
            STARS_CURRENCY,
            vec![LabeledPrice::new("Plushie", 50)],
        )
    }

    #[test]
    fn test_invoice_validation() {
        assert!(stars_invoice().validate().is_ok());

        let no_prices = InvoiceDetails::new("T", "D", "p", "USD", vec![]);
        assert!(no_prices.validate().is_err());

        let tips = InvoiceDetails::new("T", "D", "p", "USD", vec![LabeledPrice::new("x", 100)])
            .tips(500, vec![100, 50]);
        assert!(tips.validate().is_err());

        let over = InvoiceDetails::new("T", "D", "p", "USD", vec![LabeledPrice::new("x", 100)])
            .tips(500, vec![100, 600]);
        assert!(over.validate().is_err());
    }

    #[test]
    fn test_send_invoice_flattens_details() {
        let json = serde_json::to_value(SendInvoiceRequest::new(42, stars_invoice())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "chat_id": 42,
                "title": "Crab plushie",
                "description": "A soft Ferris",
                "payload": "order-17",
                "currency": "XTR",
                "prices": [{"label": "Plushie", "amount": 50}]
            })
        );
    }

    #[tokio::test]
    async fn test_create_invoice_link() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(method_path("createInvoiceLink")))
            .respond_with(ok(serde_json::json!("https://t.me/$abc")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = PaymentsApi::new(test_context(&mock_server.uri()));
        let link = api.create_invoice_link(&stars_invoice()).await.unwrap();
        assert_eq!(link, "https://t.me/$abc");
    }

    #[tokio::test]
    async fn test_answer_shipping_query_variants() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(method_path("answerShippingQuery")))
            .and(body_json(serde_json::json!({
                "shipping_query_id": "sq1",
                "ok": true,
                "shipping_options": [{
                    "id": "post",
                    "title": "Post",
                    "prices": [{"label": "Post", "amount": 300}]
                }]
            })))
            .respond_with(ok(serde_json::json!(true)))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path(method_path("answerShippingQuery")))
            .and(body_json(serde_json::json!({
                "shipping_query_id": "sq2",
                "ok": false,
                "error_message": "No delivery to Antarctica"
            })))
            .respond_with(ok(serde_json::json!(true)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = PaymentsApi::new(test_context(&mock_server.uri()));
        let option = ShippingOption::new("post", "Post", vec![LabeledPrice::new("Post", 300)]);
        assert!(api
            .answer_shipping_query("sq1", &ShippingAnswer::Ok(vec![option]))
            .await
            .unwrap());
        assert!(api
            .answer_shipping_query(
                "sq2",
                &ShippingAnswer::Error("No delivery to Antarctica".to_string())
            )
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_answer_pre_checkout_ok() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(method_path("answerPreCheckoutQuery")))
            .and(body_json(serde_json::json!({"pre_checkout_query_id": "pc1", "ok": true})))
            .respond_with(ok(serde_json::json!(true)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = PaymentsApi::new(test_context(&mock_server.uri()));
        assert!(api
            .answer_pre_checkout_query("pc1", &PreCheckoutAnswer::Ok)
            .await
            .unwrap());
    }
}
