//! Company catalog store.
//!
//! The matcher reads the catalog through [`CompanyStore`], which must hand
//! back a snapshot that stays consistent for one matching call.
//! [`MemoryStore`] is an in-process implementation with the full
//! create / read / update / delete / search surface; durable storage lives
//! outside this crate behind the same trait.

use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::models::{Company, CompanyId, TokenSet};

/// Read access to the company catalog.
pub trait CompanyStore {
    /// All companies in catalog (ID) order.
    fn list_companies(&self) -> Result<Vec<Company>, StoreError>;

    /// One company by ID.
    fn get_company(&self, id: CompanyId) -> Result<Option<Company>, StoreError>;

    /// Identifies the current catalog contents. Changes whenever the catalog does.
    fn snapshot_id(&self) -> Result<String, StoreError>;
}

/// Partial update of a company. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub machines: Option<String>,
    pub skills: Option<String>,
    pub notes: Option<String>,
    pub capacity: Option<String>,
    pub location: Option<String>,
}

impl CompanyUpdate {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.machines.is_none()
            && self.skills.is_none()
            && self.notes.is_none()
            && self.capacity.is_none()
            && self.location.is_none()
    }

    fn apply(self, company: &mut Company) {
        if let Some(name) = self.name {
            company.name = name;
        }
        if let Some(machines) = self.machines {
            company.machines = TokenSet::parse(&machines);
        }
        if let Some(skills) = self.skills {
            company.skills = TokenSet::parse(&skills);
        }
        if let Some(notes) = self.notes {
            company.notes = notes;
        }
        if let Some(capacity) = self.capacity {
            company.capacity = Some(capacity);
        }
        if let Some(location) = self.location {
            company.location = Some(location);
        }
    }
}

/// In-memory catalog keyed by ID.
///
/// IDs are assigned sequentially from 1 and never reused. Every mutation
/// bumps the revision reported by [`CompanyStore::snapshot_id`].
#[derive(Debug, Clone)]
pub struct MemoryStore {
    companies: BTreeMap<CompanyId, Company>,
    next_id: CompanyId,
    revision: u64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            companies: BTreeMap::new(),
            next_id: 1,
            revision: 0,
        }
    }

    /// Creates a store holding the demo catalog.
    pub fn with_seed() -> Self {
        let mut store = Self::new();
        for company in seed_companies() {
            store.create(company);
        }
        store
    }

    /// Creates a store from existing records, keeping their IDs.
    ///
    /// Of two records sharing an ID the last one wins.
    pub fn from_companies(companies: impl IntoIterator<Item = Company>) -> Self {
        let mut store = Self::new();
        for company in companies {
            store.next_id = store.next_id.max(company.id + 1);
            store.companies.insert(company.id, company);
        }
        store
    }

    /// Adds a company and returns its new ID. `company.id` is ignored.
    pub fn create(&mut self, mut company: Company) -> CompanyId {
        let id = self.next_id;
        self.next_id += 1;
        company.id = id;
        self.companies.insert(id, company);
        self.revision += 1;
        id
    }

    /// One company by ID.
    pub fn get(&self, id: CompanyId) -> Option<&Company> {
        self.companies.get(&id)
    }

    /// Applies a partial update. Returns `false` if the company does not
    /// exist or the update sets no field.
    pub fn update(&mut self, id: CompanyId, update: CompanyUpdate) -> bool {
        if update.is_empty() {
            return false;
        }
        match self.companies.get_mut(&id) {
            Some(company) => {
                update.apply(company);
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    /// Removes a company. Returns whether it existed.
    pub fn delete(&mut self, id: CompanyId) -> bool {
        let removed = self.companies.remove(&id).is_some();
        if removed {
            self.revision += 1;
        }
        removed
    }

    /// Case-insensitive substring search over name, machines, skills, and notes.
    ///
    /// A blank query matches every company.
    pub fn search(&self, query: &str) -> Vec<Company> {
        let needle = query.trim().to_lowercase();
        self.companies
            .values()
            .filter(|c| {
                needle.is_empty()
                    || c.name.to_lowercase().contains(&needle)
                    || c.profile_text().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Number of companies.
    pub fn len(&self) -> usize {
        self.companies.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CompanyStore for MemoryStore {
    fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
        Ok(self.companies.values().cloned().collect())
    }

    fn get_company(&self, id: CompanyId) -> Result<Option<Company>, StoreError> {
        Ok(self.companies.get(&id).cloned())
    }

    fn snapshot_id(&self) -> Result<String, StoreError> {
        Ok(format!("memory-rev-{}", self.revision))
    }
}

impl<S: CompanyStore + ?Sized> CompanyStore for &S {
    fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
        (**self).list_companies()
    }

    fn get_company(&self, id: CompanyId) -> Result<Option<Company>, StoreError> {
        (**self).get_company(id)
    }

    fn snapshot_id(&self) -> Result<String, StoreError> {
        (**self).snapshot_id()
    }
}

/// Demo catalog: a VMC + CMM shop, a manual milling shop, and a tapping
/// specialist.
pub fn seed_companies() -> Vec<Company> {
    vec![
        Company::new(0, "大田VMC精機")
            .with_machines("VMC,三次元測定機")
            .with_skills("ステンレス,フランジ")
            .with_notes("SUS加工が得意。薄肉注意。")
            .with_capacity("Medium")
            .with_location("Tokyo"),
        Company::new(0, "町工場フライス")
            .with_machines("汎用フライス,ボール盤")
            .with_skills("アルミ,プレート")
            .with_notes("小ロット歓迎。")
            .with_capacity("Low")
            .with_location("Kawasaki"),
        Company::new(0, "精密タップ工業")
            .with_machines("タッピングセンタ")
            .with_skills("SUS,ねじ穴")
            .with_notes("ねじ穴加工の実績豊富。")
            .with_capacity("High")
            .with_location("Yokohama"),
    ]
}
