// src/web/handlers/subscription_handlers.rs
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::info;
use validator::Validate;

use super::unprocessable;
use crate::store::{Subscription, SubscriptionStore};
use crate::web::types::{SubscribeRequest, SubscribeResponse, ValidationErrorResponse};

pub async fn subscribe_handler(
    request: Json<SubscribeRequest>,
    subscriptions: &State<SubscriptionStore>,
) -> Result<Json<SubscribeResponse>, status::Custom<Json<ValidationErrorResponse>>> {
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return Err(unprocessable(ValidationErrorResponse::from_validation_errors(&errors)));
    }

    let subscription = Subscription::new(&request.email, request.keyword);
    subscriptions.append(subscription.clone());

    info!(
        "New subscription for {} (keyword: {})",
        subscription.email,
        subscription.keyword.as_deref().unwrap_or("<any>")
    );

    Ok(Json(SubscribeResponse {
        message: "Subscription successful".to_string(),
        subscription,
    }))
}
