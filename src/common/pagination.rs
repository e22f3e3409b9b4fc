use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// Parâmetros de paginação aceitos por todos os endpoints de listagem.
// Padrão: página 1 com 10 itens; o limite é travado entre 1 e 100.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self { page, limit }
    }

    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

// Metadados que acompanham cada página de resultados.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total_items: i64,
    pub item_count: i64,
    pub items_per_page: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

impl PaginationMeta {
    pub fn new(params: &PaginationParams, total_items: i64, item_count: i64) -> Self {
        let items_per_page = params.limit();
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + items_per_page - 1) / items_per_page
        };

        Self {
            total_items,
            item_count,
            items_per_page,
            total_pages,
            current_page: params.page(),
        }
    }
}

// Envelope de resposta das listagens: `{ data: [...], meta: {...} }`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, params: &PaginationParams, total_items: i64) -> Self {
        let meta = PaginationMeta::new(params, total_items, data.len() as i64);
        Self { data, meta }
    }
}
