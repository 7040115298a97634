//! Staff endpoints: customer list and purchase registration.
//!
//! Mounted under `/api/v1/staff`, which is guarded for admins and employees.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{
    AccountId, AccountStatus, Error, Money, MoneyInput, PurchaseReceipt, ServiceError, StaffMember,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{flow_error, pages};
use crate::inbound::http::state::HttpState;

/// Body of `POST /api/v1/staff/purchases`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordPurchaseRequest {
    #[schema(example = 12)]
    pub customer_id: i64,
    /// Decimal text or number with at most two decimal places.
    #[schema(value_type = String, example = "120.00")]
    pub amount: MoneyInput,
}

fn parse_request(request: RecordPurchaseRequest) -> Result<(AccountId, Money), ServiceError> {
    let customer_id = AccountId::new(request.customer_id)
        .map_err(|err| ServiceError::validation("customerId", err.to_string()))?;
    let amount = Money::try_from(request.amount)
        .map_err(|err| ServiceError::invalid_amount("amount", &err))?;
    Ok((customer_id, amount))
}

/// Customers with their loyalty progress.
#[utoipa::path(
    get,
    path = "/api/v1/staff/customers",
    responses(
        (status = 200, description = "Customers ordered by id", body = [AccountStatus]),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Not staff", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["staff"],
    operation_id = "listCustomers"
)]
#[get("/customers")]
pub async fn list_customers(
    state: web::Data<HttpState>,
    staff: StaffMember,
) -> ApiResult<web::Json<Vec<AccountStatus>>> {
    state
        .accounts
        .list_customers(&staff)
        .await
        .map(web::Json)
        .map_err(|err| flow_error(err, pages::PURCHASES))
}

/// Record a qualifying purchase for a customer.
#[utoipa::path(
    post,
    path = "/api/v1/staff/purchases",
    request_body = RecordPurchaseRequest,
    responses(
        (status = 201, description = "Purchase counted", body = PurchaseReceipt),
        (status = 400, description = "Invalid or below-threshold amount", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Not staff", body = Error),
        (status = 404, description = "No such customer", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["staff"],
    operation_id = "recordPurchase"
)]
#[post("/purchases")]
pub async fn record_purchase(
    state: web::Data<HttpState>,
    staff: StaffMember,
    payload: web::Json<RecordPurchaseRequest>,
) -> ApiResult<HttpResponse> {
    let (customer_id, amount) =
        parse_request(payload.into_inner()).map_err(|err| flow_error(err, pages::PURCHASES))?;

    let receipt = state
        .ledger
        .record_purchase(&staff, customer_id, amount)
        .await
        .map_err(|err| flow_error(err, pages::PURCHASES))?;
    Ok(HttpResponse::Created().json(receipt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::domain::{Account, DisplayName, PasswordHash, PurchaseCount, Role, RoleSet};
    use crate::inbound::http::error::json_config;
    use crate::inbound::http::test_utils::{
        MockPorts, login_as, test_login, test_session_middleware,
    };
    use crate::middleware::RequireRoles;

    macro_rules! staff_app {
        ($ports:expr) => {
            App::new()
                .app_data($ports.into_state())
                .app_data(json_config())
                .wrap(test_session_middleware())
                .service(test_login)
                .service(
                    web::scope("/api/v1/staff")
                        .wrap(RequireRoles::new(RoleSet::STAFF))
                        .service(list_customers)
                        .service(record_purchase),
                )
        };
    }

    fn receipt(new_count: u32) -> PurchaseReceipt {
        let customer = Account {
            id: AccountId::new(12).expect("valid id"),
            display_name: DisplayName::new("Luis").expect("valid name"),
            password_hash: PasswordHash::new("hash".to_owned()),
            role: Role::Customer,
            purchase_count: PurchaseCount::new(new_count),
            created_at: chrono::Utc::now(),
        };
        let staff = StaffMember::try_from(crate::inbound::http::test_utils::test_identity(
            2,
            Role::Employee,
        ))
        .expect("employee is staff");
        PurchaseReceipt::new(&customer, Money::from_minor_units(12_000), &staff)
    }

    #[rstest]
    #[case(json!("120.00"))]
    #[case(json!(120))]
    #[actix_web::test]
    async fn records_purchase_for_staff(#[case] amount: Value) {
        let mut ports = MockPorts::default();
        ports
            .ledger
            .expect_record_purchase()
            .withf(|staff, customer, amount| {
                staff.account_id().get() == 2
                    && customer.get() == 12
                    && amount.minor_units() == 12_000
            })
            .times(1)
            .return_once(|_, _, _| Ok(receipt(8)));
        let app = test::init_service(staff_app!(ports)).await;
        let cookie = login_as!(&app, 2, "employee");

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/staff/purchases")
                .cookie(cookie)
                .set_json(json!({"customerId": 12, "amount": amount}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["newCount"], 8);
        assert_eq!(body["rewardEarned"], true);
        assert_eq!(body["purchasesUntilReward"], 8);
        assert_eq!(body["recordedBy"], "employee-2");
    }

    #[rstest]
    #[case(json!("12.345"))]
    #[case(json!("-5"))]
    #[case(json!("lots"))]
    #[case(json!(""))]
    #[actix_web::test]
    async fn malformed_amounts_are_validation_errors(#[case] amount: Value) {
        let app = test::init_service(staff_app!(MockPorts::default())).await;
        let cookie = login_as!(&app, 1, "admin");

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/staff/purchases")
                .cookie(cookie)
                .set_json(json!({"customerId": 12, "amount": amount}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "amount");
        assert_eq!(body["returnTo"], "/staff/purchases");
    }

    #[actix_web::test]
    async fn below_threshold_is_reported() {
        let mut ports = MockPorts::default();
        ports
            .ledger
            .expect_record_purchase()
            .return_once(|_, _, _| Err(ServiceError::below_threshold("99.99")));
        let app = test::init_service(staff_app!(ports)).await;
        let cookie = login_as!(&app, 2, "employee");

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/staff/purchases")
                .cookie(cookie)
                .set_json(json!({"customerId": 12, "amount": "99.99"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "below_threshold");
    }

    #[actix_web::test]
    async fn customers_cannot_record_purchases() {
        let app = test::init_service(staff_app!(MockPorts::default())).await;
        let cookie = login_as!(&app, 12, "customer");

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/staff/purchases")
                .cookie(cookie)
                .set_json(json!({"customerId": 12, "amount": "500"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn lists_customers_for_staff() {
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_list_customers()
            .times(1)
            .return_once(|_| Ok(Vec::new()));
        let app = test::init_service(staff_app!(ports)).await;
        let cookie = login_as!(&app, 1, "admin");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/staff/customers")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!([]));
    }
}
