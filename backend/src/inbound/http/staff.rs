//! Administrator endpoints for accounts and employees.
//!
//! Mounted under `/api/v1/admin`, which only admits administrators.

use actix_web::{delete, get, web};

use crate::domain::ports::RemovedEmployee;
use crate::domain::{AccountId, AccountProfile, Administrator, Error, ServiceError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{flow_error, pages};
use crate::inbound::http::state::HttpState;

fn employee_id(raw: i64) -> Result<AccountId, Error> {
    AccountId::new(raw)
        .map_err(|err| flow_error(ServiceError::validation("id", err.to_string()), pages::EMPLOYEES))
}

/// Every account's public profile.
#[utoipa::path(
    get,
    path = "/api/v1/admin/accounts",
    responses(
        (status = 200, description = "All accounts ordered by id", body = [AccountProfile]),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Not an administrator", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listAccounts"
)]
#[get("/accounts")]
pub async fn list_accounts(
    state: web::Data<HttpState>,
    admin: Administrator,
) -> ApiResult<web::Json<Vec<AccountProfile>>> {
    state
        .accounts
        .list_accounts(&admin)
        .await
        .map(web::Json)
        .map_err(|err| flow_error(err, pages::HOME))
}

/// Employees, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/admin/employees",
    responses(
        (status = 200, description = "Employees", body = [AccountProfile]),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Not an administrator", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listEmployees"
)]
#[get("/employees")]
pub async fn list_employees(
    state: web::Data<HttpState>,
    admin: Administrator,
) -> ApiResult<web::Json<Vec<AccountProfile>>> {
    state
        .staff
        .list_employees(&admin)
        .await
        .map(web::Json)
        .map_err(|err| flow_error(err, pages::EMPLOYEES))
}

/// One employee.
#[utoipa::path(
    get,
    path = "/api/v1/admin/employees/{id}",
    params(("id" = i64, Path, description = "Employee account id")),
    responses(
        (status = 200, description = "Employee profile", body = AccountProfile),
        (status = 404, description = "No such employee", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "getEmployee"
)]
#[get("/employees/{id}")]
pub async fn get_employee(
    state: web::Data<HttpState>,
    admin: Administrator,
    path: web::Path<i64>,
) -> ApiResult<web::Json<AccountProfile>> {
    let target = employee_id(path.into_inner())?;
    state
        .staff
        .employee(&admin, target)
        .await
        .map(web::Json)
        .map_err(|err| flow_error(err, pages::EMPLOYEES))
}

/// Remove an employee account.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/employees/{id}",
    params(("id" = i64, Path, description = "Employee account id")),
    responses(
        (status = 200, description = "Employee removed", body = RemovedEmployee),
        (status = 403, description = "Self-removal or not an administrator", body = Error),
        (status = 404, description = "No such employee", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "removeEmployee"
)]
#[delete("/employees/{id}")]
pub async fn remove_employee(
    state: web::Data<HttpState>,
    admin: Administrator,
    path: web::Path<i64>,
) -> ApiResult<web::Json<RemovedEmployee>> {
    let target = employee_id(path.into_inner())?;
    state
        .staff
        .remove_employee(&admin, target)
        .await
        .map(web::Json)
        .map_err(|err| flow_error(err, pages::EMPLOYEES))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::{Role, RoleSet};
    use crate::inbound::http::error::path_config;
    use crate::inbound::http::test_utils::{
        MockPorts, login_as, test_login, test_session_middleware,
    };
    use crate::middleware::RequireRoles;

    macro_rules! admin_app {
        ($ports:expr) => {
            App::new()
                .app_data($ports.into_state())
                .app_data(path_config())
                .wrap(test_session_middleware())
                .service(test_login)
                .service(
                    web::scope("/api/v1/admin")
                        .wrap(RequireRoles::new(RoleSet::ADMIN))
                        .service(list_accounts)
                        .service(list_employees)
                        .service(get_employee)
                        .service(remove_employee),
                )
        };
    }

    #[actix_web::test]
    async fn admin_removes_employee() {
        let mut ports = MockPorts::default();
        ports
            .staff
            .expect_remove_employee()
            .withf(|admin, target| admin.account_id().get() == 1 && target.get() == 5)
            .times(1)
            .return_once(|_, target| Ok(RemovedEmployee { id: target }));
        let app = test::init_service(admin_app!(ports)).await;
        let cookie = login_as!(&app, 1, "admin");

        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri("/api/v1/admin/employees/5")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["id"], 5);
    }

    #[rstest]
    #[case(ServiceError::self_removal(), StatusCode::FORBIDDEN, "self_removal")]
    #[case(ServiceError::not_found("employee not found"), StatusCode::NOT_FOUND, "not_found")]
    #[actix_web::test]
    async fn removal_failures_are_mapped(
        #[case] failure: ServiceError,
        #[case] status: StatusCode,
        #[case] tag: &str,
    ) {
        let mut ports = MockPorts::default();
        ports
            .staff
            .expect_remove_employee()
            .return_once(move |_, _| Err(failure));
        let app = test::init_service(admin_app!(ports)).await;
        let cookie = login_as!(&app, 1, "admin");

        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri("/api/v1/admin/employees/1")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), status);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], tag);
        assert_eq!(body["returnTo"], "/admin/employees");
    }

    #[rstest]
    #[case("/api/v1/admin/employees/0")]
    #[case("/api/v1/admin/employees/abc")]
    #[actix_web::test]
    async fn malformed_ids_are_bad_requests(#[case] uri: &str) {
        let app = test::init_service(admin_app!(MockPorts::default())).await;
        let cookie = login_as!(&app, 1, "admin");

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri(uri).cookie(cookie).to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[case("employee")]
    #[case("customer")]
    #[actix_web::test]
    async fn non_admins_are_forbidden(#[case] role: &str) {
        let app = test::init_service(admin_app!(MockPorts::default())).await;
        let cookie = login_as!(&app, 3, role);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/admin/employees")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn lists_employees_and_accounts() {
        let mut ports = MockPorts::default();
        ports
            .staff
            .expect_list_employees()
            .return_once(|_| Ok(Vec::new()));
        ports
            .accounts
            .expect_list_accounts()
            .return_once(|_| Ok(Vec::new()));
        let app = test::init_service(admin_app!(ports)).await;
        let cookie = login_as!(&app, 1, Role::Admin);

        for uri in ["/api/v1/admin/employees", "/api/v1/admin/accounts"] {
            let res = test::call_service(
                &app,
                test::TestRequest::get().uri(uri).cookie(cookie.clone()).to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::OK, "{uri}");
        }
    }
}
