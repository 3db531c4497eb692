//! Submission handler.

use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Form, Router};

use crate::api::dto::SignForm;
use crate::app_state::AppState;

/// `POST /sign`: Persist a guestbook entry and redirect home.
///
/// The response is always `302 Found` to `/`, whether the entry was saved,
/// skipped for empty input, or dropped on a store failure. The
/// [`crate::domain::SubmitOutcome`] is attached as a response extension.
#[utoipa::path(
    post,
    path = "/sign",
    tag = "Guestbook",
    summary = "Sign the guestbook",
    description = "Trims and truncates `name` (100 chars) and `message` (500 chars) and stores the entry. Always redirects to `/`.",
    request_body(content = SignForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Redirect to the home page", headers(
            ("location" = String, description = "Always `/`"),
        )),
    )
)]
pub async fn sign_handler(
    State(state): State<AppState>,
    form: Result<Form<SignForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable sign form");
            SignForm::default()
        }
    };

    let name = form.name.unwrap_or_default();
    let message = form.message.unwrap_or_default();
    let outcome = state.guestbook.submit(&name, &message).await;
    tracing::info!(%outcome, "sign request handled");

    let mut response = (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response();
    response.extensions_mut().insert(outcome);
    response
}

/// Submission route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/sign", post(sign_handler))
}
