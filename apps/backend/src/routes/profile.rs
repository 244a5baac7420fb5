use actix_web::web;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::CurrentUser;
use crate::state::app_state::AppState;
use crate::users::PublicUser;

async fn get_profile(
    state: web::Data<AppState>,
    current: CurrentUser,
) -> Result<web::Json<PublicUser>, AppError> {
    let user = state
        .users
        .find_by_id(current.user_id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, "User not found"))?;

    Ok(web::Json(PublicUser::from(&user)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/profile", web::get().to(get_profile));
}
