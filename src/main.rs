// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::{auth::auth_guard, pages::page_guard};

// Constrói o router completo. Separado do main para os testes
// conseguirem disparar requisições com oneshot.
fn app(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_public_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de sessão (protegidas pelo middleware)
    let auth_private_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Administração global: empresas e usuários da plataforma
    let admin_routes = Router::new()
        .route(
            "/companies",
            post(handlers::admin::create_company).get(handlers::admin::list_companies),
        )
        .route(
            "/companies/{id}",
            get(handlers::admin::get_company)
                .put(handlers::admin::update_company)
                .delete(handlers::admin::delete_company),
        )
        .route(
            "/users",
            post(handlers::admin::create_user).get(handlers::admin::list_users),
        )
        .route("/users/{id}", axum::routing::delete(handlers::admin::delete_user))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Gestão da empresa do diretor: produtos, estoque, pedidos e finanças
    let director_routes = Router::new()
        .route(
            "/products",
            post(handlers::director::create_product).get(handlers::director::list_products),
        )
        .route(
            "/products/{id}",
            get(handlers::director::get_product)
                .put(handlers::director::update_product)
                .delete(handlers::director::delete_product),
        )
        .route("/products/{id}/restock", post(handlers::director::restock_product))
        .route("/products/{id}/thresholds", put(handlers::director::update_thresholds))
        .route("/products/{id}/movements", get(handlers::director::product_movements))
        .route(
            "/users",
            post(handlers::director::create_user).get(handlers::director::list_users),
        )
        .route("/orders", get(handlers::director::list_orders))
        .route("/orders/{id}", get(handlers::director::get_order))
        .route("/orders/{id}/status", put(handlers::director::transition_order))
        .route(
            "/payments",
            post(handlers::director::create_payment).get(handlers::director::list_payments),
        )
        .route(
            "/expenses",
            post(handlers::director::create_expense).get(handlers::director::list_expenses),
        )
        .route("/balances", get(handlers::director::company_balances))
        .route("/balances/{user_id}", get(handlers::director::user_balance))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Rotas do próprio usuário logado
    let user_routes = Router::new()
        .route(
            "/orders",
            post(handlers::user::create_order).get(handlers::user::list_orders),
        )
        .route("/orders/{id}/cancel", put(handlers::user::cancel_order))
        .route("/payments", get(handlers::user::list_payments))
        .route(
            "/expenses",
            post(handlers::user::create_expense).get(handlers::user::list_expenses),
        )
        .route("/balance", get(handlers::user::my_balance))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Compartilhadas entre papéis (registradas com o caminho completo para
    // não competir com os prefixos aninhados acima)
    let shared_routes = Router::new()
        .route(
            "/api/categories",
            get(handlers::categories::list_categories).post(handlers::categories::create_category),
        )
        .route("/api/dashboard/stats", get(handlers::dashboard::get_stats))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Páginas gateadas pela tabela caminho+papel (redirect, nunca 401)
    let page_routes = Router::new()
        .route("/dashboard", get(handlers::pages::dashboard))
        .route("/admin/dashboard", get(handlers::pages::admin_dashboard))
        .route("/director/dashboard", get(handlers::pages::director_dashboard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            page_guard,
        ));

    // Combina tudo no router principal
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_public_routes.merge(auth_private_routes))
        .nest("/api/admin", admin_routes)
        .nest("/api/director", director_routes)
        .nest("/api/user", user_routes)
        .merge(shared_routes)
        .merge(page_routes)
        .with_state(app_state)
}

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let app = app(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt; // oneshot

    // connect_lazy não abre conexão de verdade: os cenários abaixo são
    // barrados pelo middleware antes de qualquer acesso ao banco.
    fn test_app() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/ignorado")
            .unwrap();
        app(AppState::assemble(pool, "segredo-de-teste".to_string()))
    }

    async fn send(app: Router, request: Request<Body>) -> axum::response::Response {
        app.oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn health_responde_sem_sessao() {
        let response = send(
            test_app(),
            Request::builder().uri("/api/health").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn rota_gateada_sem_token_devolve_401() {
        for uri in [
            "/api/user/balance",
            "/api/director/products",
            "/api/admin/companies",
            "/api/categories",
            "/api/dashboard/stats",
            "/api/auth/me",
        ] {
            let response = send(
                test_app(),
                Request::builder().uri(uri).body(Body::empty()).unwrap(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "uri: {uri}");
        }
    }

    #[tokio::test]
    async fn mutacao_sem_token_e_barrada_antes_do_banco() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/categories")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Limpeza"}"#))
            .unwrap();

        let response = send(test_app(), request).await;

        // Se o handler tivesse rodado, a pool preguiçosa viraria um 500.
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_invalido_devolve_401() {
        let request = Request::builder()
            .uri("/api/admin/users")
            .header(header::AUTHORIZATION, "Bearer nao-e-um-jwt")
            .body(Body::empty())
            .unwrap();

        let response = send(test_app(), request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn pagina_sem_sessao_redireciona_para_login() {
        for uri in ["/dashboard", "/admin/dashboard", "/director/dashboard"] {
            let response = send(
                test_app(),
                Request::builder().uri(uri).body(Body::empty()).unwrap(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::SEE_OTHER, "uri: {uri}");
            assert_eq!(
                response.headers().get(header::LOCATION).unwrap(),
                "/login",
                "uri: {uri}"
            );
        }
    }
}
