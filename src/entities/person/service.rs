//! Person operations: CRUD plus disable, bulk import and export

use super::links::PersonLinks;
use super::model::{Person, PersonDto};
use crate::core::entity::Entity;
use crate::core::error::{BookstoreError, BookstoreResult};
use crate::core::mapper::{parse_list_objects, parse_object};
use crate::core::query::{PageRequest, PagedModel};
use crate::core::service::CrudService;
use crate::core::store::{DisableStore, EntityStore};
use crate::files::{ExportFormat, ExportedFile, ImportFormat};
use std::sync::Arc;
use tracing::info;

pub struct PersonService {
    crud: CrudService<Person, PersonDto>,
    states: Arc<dyn DisableStore<Person>>,
}

impl PersonService {
    pub fn new<S>(store: Arc<S>, links: PersonLinks) -> Self
    where
        S: DisableStore<Person> + 'static,
    {
        let records: Arc<dyn EntityStore<Person>> = store.clone();
        Self::from_parts(records, store, links)
    }

    /// Build from two views of the same store
    pub fn from_parts(
        records: Arc<dyn EntityStore<Person>>,
        states: Arc<dyn DisableStore<Person>>,
        links: PersonLinks,
    ) -> Self {
        Self {
            crud: CrudService::new(records, Arc::new(links)),
            states,
        }
    }

    pub async fn find_all(&self) -> BookstoreResult<Vec<PersonDto>> {
        self.crud.find_all().await
    }

    pub async fn find_page(&self, request: &PageRequest) -> BookstoreResult<PagedModel<PersonDto>> {
        self.crud.find_page(request).await
    }

    pub async fn find_by_name(
        &self,
        first_name: &str,
        request: &PageRequest,
    ) -> BookstoreResult<PagedModel<PersonDto>> {
        self.crud.find_by_name(first_name, request).await
    }

    pub async fn find_by_id(&self, id: i64) -> BookstoreResult<PersonDto> {
        self.crud.find_by_id(id).await
    }

    pub async fn create(&self, person: Option<PersonDto>) -> BookstoreResult<PersonDto> {
        self.crud.create(person).await
    }

    pub async fn update(&self, person: Option<PersonDto>) -> BookstoreResult<PersonDto> {
        self.crud.update(person).await
    }

    pub async fn delete(&self, id: i64) -> BookstoreResult<()> {
        self.crud.delete(id).await
    }

    pub async fn disable(&self, id: i64) -> BookstoreResult<PersonDto> {
        info!(id, "Disabling one person");
        if !self.states.disable(id).await? {
            return Err(BookstoreError::not_found());
        }
        self.crud.find_by_id(id).await
    }

    /// Persist every row of a CSV or XLSX upload.
    ///
    /// The importer is picked from the file extension. Imported people are
    /// always enabled.
    pub async fn create_from_bulk_source(
        &self,
        bytes: &[u8],
        file_name: Option<&str>,
    ) -> BookstoreResult<Vec<PersonDto>> {
        if bytes.is_empty() {
            return Err(BookstoreError::bad_request("Please set a valid file!"));
        }
        let file_name =
            file_name.ok_or_else(|| BookstoreError::bad_request("Please set a valid file!"))?;
        let format = ImportFormat::from_file_name(file_name)?;
        info!(file = file_name, ?format, "Importing people from file");

        let rows: Vec<PersonDto> = format.import(bytes)?;
        let mut created = Vec::with_capacity(rows.len());
        for row in rows {
            let mut person: Person = parse_object(&row)?;
            person.set_id(None);
            person.enabled = true;
            let saved = self.crud.store().save(person).await?;
            created.push(self.crud.to_dto(&saved)?);
        }
        info!(count = created.len(), "Imported people");
        Ok(created)
    }

    /// Export one page of people; `accept` picks CSV, XLSX or PDF
    pub async fn export_page(&self, request: &PageRequest, accept: &str) -> BookstoreResult<ExportedFile> {
        let format = ExportFormat::from_accept(accept)?;
        info!(page = request.page, size = request.size, ?format, "Exporting people");

        let page = self.crud.store().find_page(request).await?;
        let people: Vec<PersonDto> = parse_list_objects(&page.content)?;
        let bytes = format.export_records(&people)?;
        Ok(ExportedFile::new(format, "people_exported", bytes))
    }

    pub async fn export_person(&self, id: i64, accept: &str) -> BookstoreResult<ExportedFile> {
        let format = ExportFormat::from_accept(accept)?;
        info!(id, ?format, "Exporting one person");

        let person = self.crud.find_entity(id).await?;
        let dto: PersonDto = parse_object(&person)?;
        let bytes = format.export_record(&dto)?;
        Ok(ExportedFile::new(format, &format!("person_{}", id), bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::Direction;
    use crate::links::LinkBuilder;
    use crate::storage::in_memory::InMemoryStore;

    fn service() -> PersonService {
        PersonService::new(
            Arc::new(InMemoryStore::<Person>::new()),
            PersonLinks::new(LinkBuilder::new("http://localhost:8080")),
        )
    }

    fn murilo() -> PersonDto {
        PersonDto::new("Murilo", "Dias", "Uberlândia - Minas Gerais - Brasil", "Male")
    }

    #[tokio::test]
    async fn test_person_lifecycle() {
        let service = service();

        let created = service.create(Some(murilo())).await.unwrap();
        let id = created.id.unwrap();
        assert_eq!(created.first_name, "Murilo");
        assert!(created.enabled);
        assert_eq!(created.links.len(), 10);

        let mut changed = created.clone();
        changed.first_name = "Solange".into();
        changed.links.clear();
        let updated = service.update(Some(changed)).await.unwrap();
        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.first_name, "Solange");
        assert_eq!(updated.last_name, "Dias");

        let disabled = service.disable(id).await.unwrap();
        assert!(!disabled.enabled);
        assert_eq!(disabled.first_name, "Solange");
        assert_eq!(disabled.address, created.address);

        service.delete(id).await.unwrap();
        let err = service.find_by_id(id).await.unwrap_err();
        assert!(matches!(err, BookstoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_round_trip_is_field_equal() {
        let service = service();
        let created = service.create(Some(murilo())).await.unwrap();
        let found = service.find_by_id(created.id.unwrap()).await.unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_disable_unknown_is_not_found() {
        let err = service().disable(77).await.unwrap_err();
        assert!(matches!(err, BookstoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_does_not_reenable() {
        let service = service();
        let created = service.create(Some(murilo())).await.unwrap();
        service.disable(created.id.unwrap()).await.unwrap();

        let mut dto = created.clone();
        dto.enabled = true;
        let updated = service.update(Some(dto)).await.unwrap();
        assert!(!updated.enabled);
    }

    #[tokio::test]
    async fn test_bulk_import_from_csv() {
        let service = service();
        let csv = b"first_name,last_name,address,gender\nAna,Lima,Rio,Female\nBruno,Reis,Recife,Male\n";

        let created = service
            .create_from_bulk_source(csv, Some("people.CSV"))
            .await
            .unwrap();
        assert_eq!(created.len(), 2);
        assert!(created.iter().all(|p| p.enabled && p.id.is_some()));
        assert_eq!(service.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_bulk_import_rejects_bad_input() {
        let service = service();
        let err = service
            .create_from_bulk_source(b"", Some("people.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, BookstoreError::BadRequest(_)));

        let err = service
            .create_from_bulk_source(b"a,b", Some("people.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, BookstoreError::BadRequest(_)));

        let err = service.create_from_bulk_source(b"a,b", None).await.unwrap_err();
        assert!(matches!(err, BookstoreError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_export_page_as_csv() {
        let service = service();
        service.create(Some(murilo())).await.unwrap();
        service
            .create(Some(PersonDto::new("Ana", "Lima", "Rio", "Female")))
            .await
            .unwrap();

        let request = PageRequest::new(0, 12, "first_name", Direction::Asc);
        let file = service.export_page(&request, "text/csv").await.unwrap();
        assert_eq!(file.format, ExportFormat::Csv);
        assert!(file.file_name.ends_with(".csv"));

        let text = String::from_utf8(file.bytes).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "ID,First Name,Last Name,Address,Gender,Enabled");
        assert!(lines[1].contains("Ana"));
        assert_eq!(lines.len(), 3);
    }

    #[tokio::test]
    async fn test_export_with_unknown_format_is_bad_request() {
        let service = service();
        let request = PageRequest::new(0, 12, "first_name", Direction::Asc);
        let err = service.export_page(&request, "image/png").await.unwrap_err();
        assert!(matches!(err, BookstoreError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_export_person_as_pdf() {
        let service = service();
        let created = service.create(Some(murilo())).await.unwrap();
        let file = service
            .export_person(created.id.unwrap(), "application/pdf")
            .await
            .unwrap();
        assert!(file.bytes.starts_with(b"%PDF"));

        let err = service.export_person(999, "application/pdf").await.unwrap_err();
        assert!(matches!(err, BookstoreError::NotFound(_)));
    }
}
