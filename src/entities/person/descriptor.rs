//! Entity descriptor for Person

use super::handlers::{
    PersonAppState, create_person, delete_person, disable_person, export_page, export_person,
    find_people_by_name, get_person, list_people, mass_creation, update_person,
};
use super::service::PersonService;
use crate::server::entity_registry::EntityDescriptor;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

/// Descriptor for the Person resource
pub struct PersonDescriptor {
    pub service: Arc<PersonService>,
}

impl PersonDescriptor {
    pub fn new(service: Arc<PersonService>) -> Self {
        Self { service }
    }
}

impl EntityDescriptor for PersonDescriptor {
    fn entity_type(&self) -> &str {
        "person"
    }

    fn build_routes(&self) -> Router {
        let state = PersonAppState {
            service: self.service.clone(),
        };

        Router::new()
            .route(
                "/person",
                get(list_people).post(create_person).put(update_person),
            )
            .route("/person/massCreation", post(mass_creation))
            .route("/person/exportPage", get(export_page))
            .route("/person/export/{id}", get(export_person))
            .route("/person/findPeopleByName/{first_name}", get(find_people_by_name))
            .route(
                "/person/{id}",
                get(get_person).patch(disable_person).delete(delete_person),
            )
            .with_state(state)
    }
}
