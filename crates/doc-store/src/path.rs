use common::CustomerId;

/// Visibility namespace a collection lives in.
///
/// The partition is strict: a collection is either public (shared,
/// admin-writable) or private to a single customer. Nothing is ever
/// addressed across both namespaces with one path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Shared namespace visible to every session.
    Public,

    /// Namespace private to one customer.
    Customer(CustomerId),
}

/// Address of a collection of documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath {
    scope: Scope,
    name: String,
}

impl CollectionPath {
    /// Addresses a collection in the public namespace.
    pub fn public(name: impl Into<String>) -> Self {
        Self {
            scope: Scope::Public,
            name: name.into(),
        }
    }

    /// Addresses a collection in a customer's private namespace.
    pub fn customer(customer: &CustomerId, name: impl Into<String>) -> Self {
        Self {
            scope: Scope::Customer(customer.clone()),
            name: name.into(),
        }
    }

    /// Returns the collection name within its namespace.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the namespace this collection lives in.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Returns true if the collection is in the public namespace.
    pub fn is_public(&self) -> bool {
        matches!(self.scope, Scope::Public)
    }

    /// Addresses a document within this collection.
    pub fn doc(&self, id: impl Into<String>) -> DocumentPath {
        DocumentPath {
            collection: self.clone(),
            id: id.into(),
        }
    }
}

impl std::fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.scope {
            Scope::Public => write!(f, "public/{}", self.name),
            Scope::Customer(id) => write!(f, "customers/{}/{}", id, self.name),
        }
    }
}

/// Address of a single document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    collection: CollectionPath,
    id: String,
}

impl DocumentPath {
    /// Returns the collection this document belongs to.
    pub fn collection(&self) -> &CollectionPath {
        &self.collection
    }

    /// Returns the document ID within its collection.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_path_display() {
        let path = CollectionPath::public("products");
        assert_eq!(path.to_string(), "public/products");
        assert!(path.is_public());
    }

    #[test]
    fn customer_path_display() {
        let customer = CustomerId::new("anon-7");
        let path = CollectionPath::customer(&customer, "cart");
        assert_eq!(path.to_string(), "customers/anon-7/cart");
        assert!(!path.is_public());
    }

    #[test]
    fn document_path_display() {
        let doc = CollectionPath::public("products").doc("sku-1");
        assert_eq!(doc.to_string(), "public/products/sku-1");
        assert_eq!(doc.id(), "sku-1");
        assert_eq!(doc.collection(), &CollectionPath::public("products"));
    }

    #[test]
    fn same_name_different_scope_are_distinct() {
        let a = CollectionPath::public("orders");
        let b = CollectionPath::customer(&CustomerId::new("anon-7"), "orders");
        assert_ne!(a, b);
    }
}
