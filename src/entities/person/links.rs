//! Link set of a person representation

use super::model::PersonDto;
use crate::core::link::LinkAssembler;
use crate::core::link::Representation;
use crate::links::{LinkBuilder, rel};
use axum::http::Method;

pub const PERSON_PATH: &str = "/person";

/// Adds `self`, `findAll`, `findByName`, `create`, `createWithFile`,
/// `update`, `disable`, `delete`, `exportPage` and `exportPerson`
#[derive(Debug, Clone)]
pub struct PersonLinks {
    builder: LinkBuilder,
}

impl PersonLinks {
    pub fn new(builder: LinkBuilder) -> Self {
        Self { builder }
    }
}

impl LinkAssembler<PersonDto> for PersonLinks {
    fn add_links(&self, dto: &mut PersonDto) {
        let id = dto.id.map(|id| id.to_string()).unwrap_or_default();
        let item = format!("{PERSON_PATH}/{id}");
        let discovery = LinkBuilder::discovery_query();
        let by_name = format!(
            "{PERSON_PATH}/findPeopleByName/{}?{discovery}",
            LinkBuilder::segment(&dto.first_name)
        );

        let links = [
            self.builder.link(rel::SELF, Method::GET, &item),
            self.builder
                .link(rel::FIND_ALL, Method::GET, &format!("{PERSON_PATH}?{discovery}")),
            self.builder.link(rel::FIND_BY_NAME, Method::GET, &by_name),
            self.builder.link(rel::CREATE, Method::POST, PERSON_PATH),
            self.builder.link(
                rel::CREATE_WITH_FILE,
                Method::POST,
                &format!("{PERSON_PATH}/massCreation"),
            ),
            self.builder.link(rel::UPDATE, Method::PUT, PERSON_PATH),
            self.builder.link(rel::DISABLE, Method::PATCH, &item),
            self.builder.link(rel::DELETE, Method::DELETE, &item),
            self.builder
                .link(
                    rel::EXPORT_PAGE,
                    Method::GET,
                    &format!("{PERSON_PATH}/exportPage?{discovery}"),
                )
                .with_title("Export People"),
            self.builder
                .link(
                    rel::EXPORT_PERSON,
                    Method::GET,
                    &format!("{PERSON_PATH}/export/{id}"),
                )
                .with_title("Export Person"),
        ];
        for link in links {
            dto.add_link(link);
        }
    }

    fn collection_href(&self) -> String {
        self.builder.href(PERSON_PATH)
    }

    fn search_href(&self, name: &str) -> String {
        self.builder.href(&format!(
            "{PERSON_PATH}/findPeopleByName/{}",
            LinkBuilder::segment(name)
        ))
    }
}
