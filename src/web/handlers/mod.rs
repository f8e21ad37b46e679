pub mod job_handlers;
pub mod subscription_handlers;

pub use job_handlers::*;
pub use subscription_handlers::*;

use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;

use crate::web::types::ValidationErrorResponse;

pub(crate) fn unprocessable(
    response: ValidationErrorResponse,
) -> status::Custom<Json<ValidationErrorResponse>> {
    status::Custom(Status::UnprocessableEntity, Json(response))
}
