// src/middleware/pages.rs

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::{common::error::AppError, config::AppState, models::auth::UserRole};

// Decisão do guardião de páginas. A tabela caminho+papel é uma função
// pura; a falha é sempre um redirect, nunca um erro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDecision {
    Allow,
    Redirect(&'static str),
}

// Tabela de autorização por prefixo de caminho:
//   /admin/*    -> ADMIN, senão volta para /dashboard
//   /director/* -> COMPANY_DIRECTOR, senão volta para /dashboard
//   /dashboard  -> ADMIN e COMPANY_DIRECTOR são levados aos seus painéis
// Sem sessão, qualquer página cai em /login.
pub fn route_decision(path: &str, role: Option<UserRole>) -> PageDecision {
    let Some(role) = role else {
        return PageDecision::Redirect("/login");
    };

    if path == "/admin" || path.starts_with("/admin/") {
        if role == UserRole::Admin {
            PageDecision::Allow
        } else {
            PageDecision::Redirect("/dashboard")
        }
    } else if path == "/director" || path.starts_with("/director/") {
        if role == UserRole::CompanyDirector {
            PageDecision::Allow
        } else {
            PageDecision::Redirect("/dashboard")
        }
    } else if path == "/dashboard" {
        match role {
            UserRole::Admin => PageDecision::Redirect("/admin/dashboard"),
            UserRole::CompanyDirector => PageDecision::Redirect("/director/dashboard"),
            UserRole::User => PageDecision::Allow,
        }
    } else {
        PageDecision::Allow
    }
}

// O middleware aplicado às rotas de página. Sessão inválida é tratada
// como ausente (redirect silencioso, nunca um crash).
pub async fn page_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let user = match token {
        Some(token) => app_state.auth_service.validate_token(token).await.ok(),
        None => None,
    };

    match route_decision(request.uri().path(), user.as_ref().map(|u| u.role)) {
        PageDecision::Allow => {
            if let Some(user) = user {
                request.extensions_mut().insert(user);
            }
            Ok(next.run(request).await)
        }
        PageDecision::Redirect(to) => Ok(Redirect::to(to).into_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sem_sessao_vai_para_login() {
        assert_eq!(route_decision("/dashboard", None), PageDecision::Redirect("/login"));
        assert_eq!(route_decision("/admin/dashboard", None), PageDecision::Redirect("/login"));
        assert_eq!(route_decision("/director/dashboard", None), PageDecision::Redirect("/login"));
    }

    #[test]
    fn admin_tem_acesso_exclusivo_as_paginas_de_admin() {
        assert_eq!(
            route_decision("/admin/dashboard", Some(UserRole::Admin)),
            PageDecision::Allow
        );
        assert_eq!(
            route_decision("/admin/dashboard", Some(UserRole::User)),
            PageDecision::Redirect("/dashboard")
        );
        assert_eq!(
            route_decision("/admin/dashboard", Some(UserRole::CompanyDirector)),
            PageDecision::Redirect("/dashboard")
        );
    }

    #[test]
    fn diretor_tem_acesso_exclusivo_as_paginas_de_diretor() {
        assert_eq!(
            route_decision("/director/dashboard", Some(UserRole::CompanyDirector)),
            PageDecision::Allow
        );
        assert_eq!(
            route_decision("/director/dashboard", Some(UserRole::Admin)),
            PageDecision::Redirect("/dashboard")
        );
        assert_eq!(
            route_decision("/director/dashboard", Some(UserRole::User)),
            PageDecision::Redirect("/dashboard")
        );
    }

    #[test]
    fn painel_generico_redireciona_papeis_elevados() {
        assert_eq!(
            route_decision("/dashboard", Some(UserRole::Admin)),
            PageDecision::Redirect("/admin/dashboard")
        );
        assert_eq!(
            route_decision("/dashboard", Some(UserRole::CompanyDirector)),
            PageDecision::Redirect("/director/dashboard")
        );
        assert_eq!(route_decision("/dashboard", Some(UserRole::User)), PageDecision::Allow);
    }
}
