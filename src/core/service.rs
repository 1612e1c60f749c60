//! Generic CRUD service shared by every resource

use crate::core::entity::{Entity, Merge};
use crate::core::error::{BookstoreError, BookstoreResult};
use crate::core::link::{LinkAssembler, Representation};
use crate::core::mapper::{parse_list_objects, parse_object};
use crate::core::query::{Page, PageRequest, PagedModel};
use crate::core::store::EntityStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::info;

/// CRUD operations over records of type `E`, exposed as representations `D`.
///
/// Every returned representation carries its full link set.
pub struct CrudService<E: Entity, D> {
    store: Arc<dyn EntityStore<E>>,
    links: Arc<dyn LinkAssembler<D>>,
}

impl<E: Entity, D> Clone for CrudService<E, D> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            links: self.links.clone(),
        }
    }
}

impl<E, D> CrudService<E, D>
where
    E: Entity + Merge<D> + Serialize + DeserializeOwned,
    D: Representation + Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn EntityStore<E>>, links: Arc<dyn LinkAssembler<D>>) -> Self {
        Self { store, links }
    }

    pub fn store(&self) -> &Arc<dyn EntityStore<E>> {
        &self.store
    }

    pub async fn find_all(&self) -> BookstoreResult<Vec<D>> {
        info!(resource = E::resource_name(), "Finding all records");
        let entities = self.store.find_all().await?;
        let mut dtos: Vec<D> = parse_list_objects(&entities)?;
        for dto in &mut dtos {
            self.links.add_links(dto);
        }
        Ok(dtos)
    }

    pub async fn find_page(&self, request: &PageRequest) -> BookstoreResult<PagedModel<D>> {
        info!(
            resource = E::resource_name(),
            page = request.page,
            size = request.size,
            direction = request.direction.as_str(),
            "Finding page of records"
        );
        let page = self.store.find_page(request).await?;
        let base = self.links.collection_href();
        self.to_paged_model(page, |n| format!("{}?{}", base, request.query_for(n)))
    }

    pub async fn find_by_name(
        &self,
        name: &str,
        request: &PageRequest,
    ) -> BookstoreResult<PagedModel<D>> {
        info!(resource = E::resource_name(), name, "Finding records by name");
        let page = self.store.find_by_name(name, request).await?;
        let base = self.links.search_href(name);
        self.to_paged_model(page, |n| format!("{}?{}", base, request.query_for(n)))
    }

    pub async fn find_by_id(&self, id: i64) -> BookstoreResult<D> {
        info!(resource = E::resource_name(), id, "Finding one record");
        let entity = self.find_entity(id).await?;
        self.to_dto(&entity)
    }

    pub async fn create(&self, dto: Option<D>) -> BookstoreResult<D> {
        let dto = dto.ok_or_else(BookstoreError::required_object_is_null)?;
        info!(resource = E::resource_name(), "Creating one record");

        let mut entity: E = parse_object(&dto)?;
        entity.set_id(None);
        let saved = self.store.save(entity).await?;
        self.to_dto(&saved)
    }

    pub async fn update(&self, dto: Option<D>) -> BookstoreResult<D> {
        let dto = dto.ok_or_else(BookstoreError::required_object_is_null)?;
        let id = dto.id().ok_or_else(BookstoreError::not_found)?;
        info!(resource = E::resource_name(), id, "Updating one record");

        let mut entity = self.find_entity(id).await?;
        entity.merge_from(&dto);
        let saved = self.store.save(entity).await?;
        self.to_dto(&saved)
    }

    pub async fn delete(&self, id: i64) -> BookstoreResult<()> {
        info!(resource = E::resource_name(), id, "Deleting one record");
        let entity = self.find_entity(id).await?;
        self.store.delete(&entity).await?;
        Ok(())
    }

    /// Load a record or fail with `NotFound`
    pub async fn find_entity(&self, id: i64) -> BookstoreResult<E> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(BookstoreError::not_found)
    }

    /// Map a record to its representation and attach links
    pub fn to_dto(&self, entity: &E) -> BookstoreResult<D> {
        let mut dto: D = parse_object(entity)?;
        self.links.add_links(&mut dto);
        Ok(dto)
    }

    fn to_paged_model(
        &self,
        page: Page<E>,
        href_for: impl Fn(usize) -> String,
    ) -> BookstoreResult<PagedModel<D>> {
        let page = page.try_map(|entity| self.to_dto(&entity))?;
        Ok(PagedModel::assemble(page, href_for))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldValue;
    use crate::core::link::Link;
    use crate::storage::in_memory::InMemoryStore;
    use axum::http::Method;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Note {
        id: Option<i64>,
        text: String,
    }

    impl Entity for Note {
        fn resource_name() -> &'static str {
            "notes"
        }
        fn default_sort_field() -> &'static str {
            "text"
        }
        fn id(&self) -> Option<i64> {
            self.id
        }
        fn set_id(&mut self, id: Option<i64>) {
            self.id = id;
        }
        fn name(&self) -> &str {
            &self.text
        }
        fn field_value(&self, field: &str) -> Option<FieldValue> {
            match field {
                "id" => Some(self.id.into()),
                "text" => Some(self.text.as_str().into()),
                _ => None,
            }
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct NoteDto {
        id: Option<i64>,
        text: String,
        #[serde(default)]
        links: Vec<Link>,
    }

    crate::impl_representation!(NoteDto);

    impl Merge<NoteDto> for Note {
        fn merge_from(&mut self, source: &NoteDto) {
            self.text = source.text.clone();
        }
    }

    struct NoteLinks;

    impl LinkAssembler<NoteDto> for NoteLinks {
        fn add_links(&self, dto: &mut NoteDto) {
            let href = format!("http://test/notes/{}", dto.id.unwrap_or_default());
            dto.add_link(Link::new("self", href, Method::GET));
        }
        fn collection_href(&self) -> String {
            "http://test/notes".into()
        }
        fn search_href(&self, name: &str) -> String {
            format!("http://test/notes/search/{}", name)
        }
    }

    /// Counts calls reaching the wrapped store
    #[derive(Default)]
    struct CountingStore {
        inner: InMemoryStore<Note>,
        lookups: AtomicUsize,
        saves: AtomicUsize,
        deletes: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl EntityStore<Note> for CountingStore {
        async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Note>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_id(id).await
        }
        async fn find_all(&self) -> anyhow::Result<Vec<Note>> {
            self.inner.find_all().await
        }
        async fn find_page(&self, request: &PageRequest) -> anyhow::Result<Page<Note>> {
            self.inner.find_page(request).await
        }
        async fn find_by_name(
            &self,
            name: &str,
            request: &PageRequest,
        ) -> anyhow::Result<Page<Note>> {
            self.inner.find_by_name(name, request).await
        }
        async fn save(&self, entity: Note) -> anyhow::Result<Note> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            self.inner.save(entity).await
        }
        async fn delete(&self, entity: &Note) -> anyhow::Result<()> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            self.inner.delete(entity).await
        }
    }

    fn service() -> (Arc<CountingStore>, CrudService<Note, NoteDto>) {
        let store = Arc::new(CountingStore::default());
        let service = CrudService::new(store.clone(), Arc::new(NoteLinks));
        (store, service)
    }

    fn dto(id: Option<i64>, text: &str) -> NoteDto {
        NoteDto {
            id,
            text: text.into(),
            links: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_links() {
        let (_, service) = service();
        let created = service.create(Some(dto(Some(99), "first"))).await.unwrap();
        assert_eq!(created.id, Some(1));
        assert_eq!(created.link("self").unwrap().href, "http://test/notes/1");
    }

    #[tokio::test]
    async fn test_create_without_payload_never_reaches_store() {
        let (store, service) = service();
        let err = service.create(None).await.unwrap_err();
        assert!(matches!(err, BookstoreError::InvalidArgument(_)));
        assert_eq!(store.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_without_payload_never_reaches_store() {
        let (store, service) = service();
        let err = service.update(None).await.unwrap_err();
        assert!(matches!(err, BookstoreError::InvalidArgument(_)));
        assert_eq!(store.lookups.load(Ordering::SeqCst), 0);
        assert_eq!(store.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_unknown_id_writes_nothing() {
        let (store, service) = service();
        let err = service.update(Some(dto(Some(7), "x"))).await.unwrap_err();
        assert!(matches!(err, BookstoreError::NotFound(_)));
        assert_eq!(store.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let (_, service) = service();
        let created = service.create(Some(dto(None, "old"))).await.unwrap();
        let updated = service
            .update(Some(dto(created.id, "new")))
            .await
            .unwrap();
        assert_eq!(updated.text, "new");
        assert_eq!(service.find_by_id(1).await.unwrap().text, "new");
    }

    #[tokio::test]
    async fn test_delete_looks_up_once_and_deletes_once() {
        let (store, service) = service();
        service.create(Some(dto(None, "gone"))).await.unwrap();

        service.delete(1).await.unwrap();
        assert_eq!(store.lookups.load(Ordering::SeqCst), 1);
        assert_eq!(store.deletes.load(Ordering::SeqCst), 1);

        let err = service.find_by_id(1).await.unwrap_err();
        assert!(matches!(err, BookstoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_does_not_delete() {
        let (store, service) = service();
        let err = service.delete(42).await.unwrap_err();
        assert!(matches!(err, BookstoreError::NotFound(_)));
        assert_eq!(store.deletes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_find_page_self_link_reflects_request() {
        let (_, service) = service();
        for text in ["b", "a", "c"] {
            service.create(Some(dto(None, text))).await.unwrap();
        }
        let request = PageRequest::new(0, 2, "text", crate::core::query::Direction::Desc);
        let model = service.find_page(&request).await.unwrap();

        let texts: Vec<_> = model.content.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(texts, vec!["c", "b"]);
        assert_eq!(
            model.link("self").unwrap().href,
            "http://test/notes?page=0&size=2&direction=desc"
        );
        assert!(model.content.iter().all(|d| d.link("self").is_some()));
    }

    #[tokio::test]
    async fn test_find_by_name_uses_search_href() {
        let (_, service) = service();
        service.create(Some(dto(None, "Hello"))).await.unwrap();
        service.create(Some(dto(None, "other"))).await.unwrap();

        let request = PageRequest::new(0, 12, "text", Default::default());
        let model = service.find_by_name("ell", &request).await.unwrap();
        assert_eq!(model.page.total_elements, 1);
        assert!(
            model
                .link("self")
                .unwrap()
                .href
                .starts_with("http://test/notes/search/ell?")
        );
    }
}
