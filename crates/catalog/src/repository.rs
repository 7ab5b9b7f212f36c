//! Read-only product lookup for a session.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use briolka_core::{DomainError, DomainResult, ProductId};

use crate::product::{NewProduct, Product};

/// Read access to the session catalog.
///
/// Implementations are immutable for the session: no operation here has side
/// effects, and the only failure is an unknown id.
pub trait CatalogRepository {
    /// All products in catalog-defined, stable order.
    fn all(&self) -> &[Product];

    fn lookup(&self, id: ProductId) -> DomainResult<&Product>;

    fn contains(&self, id: ProductId) -> bool {
        self.lookup(id).is_ok()
    }
}

/// Failure to build a catalog from an external source.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid catalog: {0}")]
    Invalid(#[from] DomainError),
}

/// Catalog held entirely in memory.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl InMemoryCatalog {
    /// Build a catalog, rejecting duplicate product ids.
    pub fn new(products: Vec<NewProduct>) -> DomainResult<Self> {
        let mut built = Vec::with_capacity(products.len());
        let mut index = HashMap::with_capacity(products.len());

        for input in products {
            let product = Product::create(input)?;
            let id = product.id_typed();
            if index.insert(id, built.len()).is_some() {
                return Err(DomainError::invariant(format!("duplicate product id {id}")));
            }
            built.push(product);
        }

        Ok(Self {
            products: built,
            index,
        })
    }

    /// Parse a JSON array of products.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogLoadError> {
        let products: Vec<NewProduct> = serde_json::from_str(json)?;
        Ok(Self::new(products)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogLoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            products = catalog.len(),
            "loaded catalog from file"
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn all(&self) -> &[Product] {
        &self.products
    }

    fn lookup(&self, id: ProductId) -> DomainResult<&Product> {
        self.index
            .get(&id)
            .map(|&i| &self.products[i])
            .ok_or(DomainError::not_found(id))
    }
}
