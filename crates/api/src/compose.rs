//! Role-conditioned view composition.
//!
//! A pure lookup, not a rule engine: each role maps to a static list of
//! navigation tabs and quick actions. Roles without an entry (visitante
//! included) get empty lists. Consistency with the data scopes (no tab or
//! action pointing at a collection the role cannot see) is a tested
//! property, not a runtime check.

use serde::Serialize;

use campana_auth::Role;

/// A navigation tab in the dashboard shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavTab {
    pub label: &'static str,
    pub route: &'static str,
    pub icon: &'static str,
}

/// A quick action on the dashboard home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub title: &'static str,
    pub route: &'static str,
    pub icon: &'static str,
}

const fn tab(label: &'static str, route: &'static str, icon: &'static str) -> NavTab {
    NavTab { label, route, icon }
}

const fn action(title: &'static str, route: &'static str, icon: &'static str) -> QuickAction {
    QuickAction { title, route, icon }
}

/// Navigation tabs for a role.
pub fn nav_tabs(role: Role) -> Vec<NavTab> {
    match role {
        Role::Master => vec![
            tab("Inicio", "/dashboard", "home"),
            tab("Territorios", "/territories", "map"),
            tab("Usuarios", "/users", "users"),
            tab("Votantes", "/voters", "list"),
            tab("Alertas", "/alerts", "bell"),
            tab("Eventos", "/events", "calendar"),
            tab("Mensajes", "/messages", "mail"),
            tab("Tareas", "/tasks", "check-square"),
            tab("Asistente", "/assistant", "sparkles"),
        ],
        Role::Candidato => vec![
            tab("Inicio", "/dashboard", "home"),
            tab("Territorios", "/territories", "map"),
            tab("Mi equipo", "/users", "users"),
            tab("Votantes", "/voters", "list"),
            tab("Alertas", "/alerts", "bell"),
            tab("Eventos", "/events", "calendar"),
            tab("Mensajes", "/messages", "mail"),
            tab("Tareas", "/tasks", "check-square"),
            tab("Asistente", "/assistant", "sparkles"),
        ],
        Role::Votante => vec![
            tab("Inicio", "/dashboard", "home"),
            tab("Mis alertas", "/alerts", "bell"),
            tab("Mis tareas", "/tasks", "check-square"),
            tab("Mis registros", "/voters", "list"),
            tab("Asistente", "/assistant", "sparkles"),
        ],
        // Technical/support roles get the shell only; their work happens
        // through the API, not the dashboard collections.
        Role::Desarrollador | Role::Lider => vec![
            tab("Inicio", "/dashboard", "home"),
            tab("Asistente", "/assistant", "sparkles"),
        ],
        Role::Visitante => Vec::new(),
    }
}

/// Quick actions for a role.
pub fn quick_actions(role: Role) -> Vec<QuickAction> {
    match role {
        Role::Master => vec![
            action("Crear territorio", "/territories/new", "map-pin"),
            action("Crear candidato", "/users/new", "user-plus"),
            action("Redactar mensaje", "/messages/new", "mail-plus"),
            action("Reportar alerta", "/alerts/new", "bell-plus"),
        ],
        Role::Candidato => vec![
            action("Crear territorio", "/territories/new", "map-pin"),
            action("Crear líder", "/users/new", "user-plus"),
            action("Programar evento", "/events/new", "calendar-plus"),
            action("Redactar mensaje", "/messages/new", "mail-plus"),
        ],
        Role::Votante => vec![
            action("Registrar votante", "/voters/new", "user-plus"),
            action("Reportar alerta", "/alerts/new", "bell-plus"),
        ],
        Role::Desarrollador | Role::Lider | Role::Visitante => Vec::new(),
    }
}
