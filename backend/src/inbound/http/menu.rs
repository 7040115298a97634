//! Menu endpoints.
//!
//! `/api/v1/menu` and `/api/v1/menu.txt` serve any logged-in account; the
//! `/api/v1/admin/menu` family is mounted in the administrator scope.

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, delete, get, post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{
    Administrator, Error, MenuItem, MenuItemId, Money, MoneyInput, NewMenuItem, ServiceError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{flow_error, pages};
use crate::inbound::http::session::Authenticated;
use crate::inbound::http::state::HttpState;

/// Body of `POST /api/v1/admin/menu`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddMenuItemRequest {
    #[schema(example = "Taco al pastor")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "Marinated pork, pineapple")]
    pub description: Option<String>,
    #[schema(value_type = String, example = "25.00")]
    pub price: MoneyInput,
}

impl TryFrom<AddMenuItemRequest> for NewMenuItem {
    type Error = ServiceError;

    fn try_from(request: AddMenuItemRequest) -> Result<Self, Self::Error> {
        let price =
            Money::try_from(request.price).map_err(|err| ServiceError::invalid_amount("price", &err))?;
        Ok(Self::try_new(&request.name, request.description.as_deref(), price)?)
    }
}

/// Dishes currently available.
#[utoipa::path(
    get,
    path = "/api/v1/menu",
    responses(
        (status = 200, description = "Available items", body = [MenuItem]),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["menu"],
    operation_id = "listMenu"
)]
#[get("/menu")]
pub async fn list_menu(
    state: web::Data<HttpState>,
    _caller: Authenticated,
) -> ApiResult<web::Json<Vec<MenuItem>>> {
    state
        .menu
        .available_items()
        .await
        .map(web::Json)
        .map_err(|err| flow_error(err, pages::HOME))
}

/// Plain-text menu download.
#[utoipa::path(
    get,
    path = "/api/v1/menu.txt",
    responses(
        (status = 200, description = "Menu as text", content_type = "text/plain", body = String),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["menu"],
    operation_id = "downloadMenu"
)]
#[get("/menu.txt")]
pub async fn download_menu(
    state: web::Data<HttpState>,
    Authenticated(identity): Authenticated,
) -> ApiResult<HttpResponse> {
    let text = state
        .menu
        .menu_text(&identity)
        .await
        .map_err(|err| flow_error(err, pages::HOME))?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename("menu.txt".to_owned())],
        })
        .body(text))
}

/// Every item, available or not.
#[utoipa::path(
    get,
    path = "/api/v1/admin/menu",
    responses(
        (status = 200, description = "All items", body = [MenuItem]),
        (status = 403, description = "Not an administrator", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listAllMenuItems"
)]
#[get("/menu")]
pub async fn list_all_items(
    state: web::Data<HttpState>,
    admin: Administrator,
) -> ApiResult<web::Json<Vec<MenuItem>>> {
    state
        .menu
        .all_items(&admin)
        .await
        .map(web::Json)
        .map_err(|err| flow_error(err, pages::MENU_ADMIN))
}

/// Add a dish.
#[utoipa::path(
    post,
    path = "/api/v1/admin/menu",
    request_body = AddMenuItemRequest,
    responses(
        (status = 201, description = "Item created", body = MenuItem),
        (status = 400, description = "Invalid name or price", body = Error),
        (status = 403, description = "Not an administrator", body = Error)
    ),
    tags = ["admin"],
    operation_id = "addMenuItem"
)]
#[post("/menu")]
pub async fn add_item(
    state: web::Data<HttpState>,
    admin: Administrator,
    payload: web::Json<AddMenuItemRequest>,
) -> ApiResult<HttpResponse> {
    let item = NewMenuItem::try_from(payload.into_inner())
        .map_err(|err| flow_error(err, pages::MENU_ADMIN))?;
    let created = state
        .menu
        .add_item(&admin, item)
        .await
        .map_err(|err| flow_error(err, pages::MENU_ADMIN))?;
    Ok(HttpResponse::Created().json(created))
}

/// Remove a dish.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/menu/{id}",
    params(("id" = i64, Path, description = "Menu item id")),
    responses(
        (status = 204, description = "Item removed"),
        (status = 404, description = "No such item", body = Error)
    ),
    tags = ["admin"],
    operation_id = "removeMenuItem"
)]
#[delete("/menu/{id}")]
pub async fn remove_item(
    state: web::Data<HttpState>,
    admin: Administrator,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = MenuItemId::new(path.into_inner())
        .map_err(|err| flow_error(ServiceError::from(err), pages::MENU_ADMIN))?;
    state
        .menu
        .remove_item(&admin, id)
        .await
        .map_err(|err| flow_error(err, pages::MENU_ADMIN))?;
    Ok(HttpResponse::NoContent().finish())
}
