// src/services/listing.rs

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    common::error::AppError,
    models::{
        negotiation::{Negotiation, NegotiationStatus},
        purchase_order::{PoStatus, PurchaseOrder},
        purchase_request::{PrStatus, PurchaseRequest},
        status::Lifecycle,
    },
};

/// O que as listagens precisam saber de cada entidade.
pub trait Listed {
    type Status: Lifecycle;

    fn status_label(&self) -> &'static str;
    fn event_id(&self) -> i32;
    fn event_name(&self) -> &str;
    fn vendor_id(&self) -> i32;
    fn vendor_name(&self) -> &str;
    fn cdsid(&self) -> &str;
    /// Data usada na ordenação (requestdate / negotiationdate / orderdate).
    fn listed_on(&self) -> NaiveDate;
}

macro_rules! impl_listed {
    ($entity:ty, $status:ty, $date:ident) => {
        impl Listed for $entity {
            type Status = $status;

            fn status_label(&self) -> &'static str {
                self.status.label()
            }
            fn event_id(&self) -> i32 {
                self.event_id
            }
            fn event_name(&self) -> &str {
                &self.event_name
            }
            fn vendor_id(&self) -> i32 {
                self.vendor_id
            }
            fn vendor_name(&self) -> &str {
                &self.vendor_name
            }
            fn cdsid(&self) -> &str {
                &self.cdsid
            }
            fn listed_on(&self) -> NaiveDate {
                self.$date
            }
        }
    };
}

impl_listed!(PurchaseRequest, PrStatus, request_date);
impl_listed!(Negotiation, NegotiationStatus, negotiation_date);
impl_listed!(PurchaseOrder, PoStatus, order_date);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    /// Mais recentes primeiro
    #[default]
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortParams {
    /// `asc` ou `desc` (padrão)
    pub sort: Option<SortOrder>,
}

/// Filtros combinados com E; filtro ausente (ou vazio) deixa tudo passar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListFilter {
    /// Status exato, como no JSON (`PENDING`, `Completed`...)
    pub status: Option<String>,
    /// Trecho do nome do evento, sem diferenciar maiúsculas
    #[serde(rename = "eventname")]
    pub event_name: Option<String>,
    /// Trecho do nome do fornecedor, sem diferenciar maiúsculas
    #[serde(rename = "vendorname")]
    pub vendor_name: Option<String>,
    #[serde(rename = "eventid")]
    pub event_id: Option<i32>,
    #[serde(rename = "vendorid")]
    pub vendor_id: Option<i32>,
    pub cdsid: Option<String>,
    pub year: Option<i32>,
    /// Início do intervalo de datas (inclusivo)
    pub from: Option<NaiveDate>,
    /// Fim do intervalo de datas (inclusivo)
    pub to: Option<NaiveDate>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl ListFilter {
    /// Status fora do conjunto da entidade é erro, não lista vazia.
    pub fn check_status<T: Listed>(&self) -> Result<(), AppError> {
        match present(&self.status) {
            Some(label) if T::Status::from_label(label).is_none() => {
                Err(AppError::InvalidInput(format!("Invalid Status: {}", label)))
            }
            _ => Ok(()),
        }
    }

    pub fn matches<T: Listed>(&self, item: &T) -> bool {
        let date = item.listed_on();

        present(&self.status).is_none_or(|s| item.status_label() == s)
            && present(&self.event_name).is_none_or(|n| contains_ignore_case(item.event_name(), n))
            && present(&self.vendor_name).is_none_or(|n| contains_ignore_case(item.vendor_name(), n))
            && self.event_id.is_none_or(|id| item.event_id() == id)
            && self.vendor_id.is_none_or(|id| item.vendor_id() == id)
            && present(&self.cdsid).is_none_or(|c| item.cdsid() == c)
            && self.year.is_none_or(|y| date.year() == y)
            && self.from.is_none_or(|from| date >= from)
            && self.to.is_none_or(|to| date <= to)
    }
}

pub fn filter<T: Listed + Clone>(items: &[T], criteria: &ListFilter) -> Vec<T> {
    items.iter().filter(|item| criteria.matches(*item)).cloned().collect()
}

/// Ordenação estável pela data: empates mantêm a ordem de entrada.
pub fn sort_by_date<T: Listed>(items: &mut [T], order: SortOrder) {
    match order {
        SortOrder::Asc => items.sort_by(|a, b| a.listed_on().cmp(&b.listed_on())),
        SortOrder::Desc => items.sort_by(|a, b| b.listed_on().cmp(&a.listed_on())),
    }
}

/// Sempre filtra e depois ordena.
pub fn filter_then_sort<T: Listed + Clone>(items: &[T], criteria: &ListFilter, order: SortOrder) -> Vec<T> {
    let mut visible = filter(items, criteria);
    sort_by_date(&mut visible, order);
    visible
}

/// Estado de uma tela de listagem: coleção completa, filtro atual e ordem.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    all: Vec<T>,
    visible: Vec<T>,
    criteria: ListFilter,
    order: SortOrder,
}

impl<T: Listed + Clone> ListView<T> {
    pub fn new(all: Vec<T>) -> Self {
        let mut view = Self {
            visible: Vec::new(),
            all,
            criteria: ListFilter::default(),
            order: SortOrder::default(),
        };
        view.refresh();
        view
    }

    pub fn items(&self) -> &[T] {
        &self.visible
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn apply_filters(&mut self, criteria: ListFilter) {
        self.criteria = criteria;
        self.refresh();
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn clear_filters(&mut self) {
        self.apply_filters(ListFilter::default());
    }

    /// Inverte asc/desc e reordena o que está visível.
    pub fn toggle_sort_order(&mut self) {
        self.order = self.order.toggled();
        sort_by_date(&mut self.visible, self.order);
    }

    pub fn sort(&mut self, order: SortOrder) {
        if self.order() != order {
            self.toggle_sort_order();
        }
    }

    fn refresh(&mut self) {
        self.visible = filter_then_sort(&self.all, &self.criteria, self.order);
    }
}

/// Listagem completa de um endpoint: valida o status, filtra e ordena.
pub fn list_view<T: Listed + Clone>(all: Vec<T>, criteria: &ListFilter, order: SortOrder) -> Result<Vec<T>, AppError> {
    criteria.check_status::<T>()?;
    let mut view = ListView::new(all);
    view.apply_filters(criteria.clone());
    view.sort(order);
    Ok(view.items().to_vec())
}
