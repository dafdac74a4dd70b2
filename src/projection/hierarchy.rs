//! Hierarchical account display names

use std::collections::HashMap;

use crate::ledger::Book;
use crate::types::Account;

/// Rule deciding how far up the parent chain a full name reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingPolicy {
    /// Stop below the top-level bucket: an account whose parent is a root
    /// contributes nothing above itself (QIF)
    SkipRootBucket,
    /// Stop where the type tag changes, so type-crossing subtrees become
    /// top-level accounts (IIF)
    SameTypeOnly,
}

impl NamingPolicy {
    fn continues(&self, book: &Book, account: &Account, parent: &Account) -> bool {
        match self {
            // a parent whose own parent is missing counts as a root bucket
            NamingPolicy::SkipRootBucket => parent
                .parent_id
                .as_deref()
                .is_some_and(|grandparent_id| book.account(grandparent_id).is_some()),
            NamingPolicy::SameTypeOnly => account.type_tag.eq_ignore_ascii_case(&parent.type_tag),
        }
    }
}

/// Memoizing resolver for colon-delimited full names
///
/// Each account's name is computed at most once; ancestors are resolved on
/// demand, so accounts may be visited in any order.
pub struct HierarchyResolver<'a> {
    book: &'a Book,
    policy: NamingPolicy,
    cache: HashMap<String, String>,
}

impl<'a> HierarchyResolver<'a> {
    pub fn new(book: &'a Book, policy: NamingPolicy) -> Self {
        Self {
            book,
            policy,
            cache: HashMap::new(),
        }
    }

    /// Full name of an account, or `None` if the account is unknown
    ///
    /// A parent identifier that does not resolve ends the chain.
    pub fn full_name(&mut self, account_id: &str) -> Option<String> {
        if let Some(name) = self.cache.get(account_id) {
            return Some(name.clone());
        }

        let book = self.book;
        let account = book.account(account_id)?;
        let parent = account
            .parent_id
            .as_deref()
            .and_then(|parent_id| book.account(parent_id));

        let full_name = match parent {
            Some(parent) if self.policy.continues(book, account, parent) => {
                match self.full_name(&parent.id) {
                    Some(prefix) => format!("{}:{}", prefix, account.name),
                    None => account.name.clone(),
                }
            }
            _ => account.name.clone(),
        };

        self.cache
            .insert(account_id.to_string(), full_name.clone());
        Some(full_name)
    }

    /// Resolve every account in the book
    pub fn resolve_all(mut self) -> HashMap<String, String> {
        let book = self.book;
        for account in book.accounts() {
            self.full_name(&account.id);
        }
        self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Book {
        let mut book = Book::new();
        let accounts = [
            ("root", "Root Account", "root", None),
            ("exp", "Expenses", "expense", Some("root")),
            ("food", "Food", "expense", Some("exp")),
            ("dining", "Dining", "expense", Some("food")),
            ("assets", "Assets", "asset", Some("root")),
            ("bank", "Bank", "bank", Some("assets")),
            ("checking", "Checking", "bank", Some("bank")),
        ];
        for (id, name, tag, parent) in accounts {
            book.add_account(Account::new(id, name, tag, parent.map(str::to_string)))
                .unwrap();
        }
        book
    }

    #[test]
    fn test_qif_names_drop_root_bucket() {
        let book = book();
        let mut resolver = HierarchyResolver::new(&book, NamingPolicy::SkipRootBucket);

        assert_eq!(resolver.full_name("dining").unwrap(), "Expenses:Food:Dining");
        assert_eq!(resolver.full_name("exp").unwrap(), "Expenses");
        assert_eq!(resolver.full_name("root").unwrap(), "Root Account");
        assert_eq!(resolver.full_name("checking").unwrap(), "Assets:Bank:Checking");
        assert!(resolver.full_name("missing").is_none());
    }

    #[test]
    fn test_iif_names_stop_at_type_boundary() {
        let book = book();
        let mut resolver = HierarchyResolver::new(&book, NamingPolicy::SameTypeOnly);

        assert_eq!(resolver.full_name("dining").unwrap(), "Expenses:Food:Dining");
        assert_eq!(resolver.full_name("checking").unwrap(), "Bank:Checking");
        assert_eq!(resolver.full_name("assets").unwrap(), "Assets");
    }

    #[test]
    fn test_resolution_is_order_independent() {
        let book = book();
        for policy in [NamingPolicy::SkipRootBucket, NamingPolicy::SameTypeOnly] {
            let all = HierarchyResolver::new(&book, policy).resolve_all();

            let mut leaf_first = HierarchyResolver::new(&book, policy);
            let dining = leaf_first.full_name("dining").unwrap();
            assert_eq!(leaf_first.full_name("dining").unwrap(), dining);

            let mut root_first = HierarchyResolver::new(&book, policy);
            for id in ["root", "exp", "food", "dining"] {
                root_first.full_name(id);
            }
            assert_eq!(root_first.full_name("dining").unwrap(), dining);
            assert_eq!(all["dining"], dining);
        }
    }

    #[test]
    fn test_dangling_parent_ends_chain() {
        let mut book = Book::new();
        book.add_account(Account::new("orphan", "Orphan", "bank", Some("gone".into())))
            .unwrap();
        let mut resolver = HierarchyResolver::new(&book, NamingPolicy::SkipRootBucket);
        assert_eq!(resolver.full_name("orphan").unwrap(), "Orphan");
    }

    #[test]
    fn test_parent_of_dangling_chain_is_a_root_bucket() {
        let mut book = Book::new();
        book.add_account(Account::new("top", "Top", "bank", Some("gone".into())))
            .unwrap();
        book.add_account(Account::new("leaf", "Leaf", "bank", Some("top".into())))
            .unwrap();
        book.add_account(Account::new("twig", "Twig", "bank", Some("leaf".into())))
            .unwrap();

        let mut resolver = HierarchyResolver::new(&book, NamingPolicy::SkipRootBucket);
        assert_eq!(resolver.full_name("leaf").unwrap(), "Leaf");
        assert_eq!(resolver.full_name("twig").unwrap(), "Leaf:Twig");
        assert_eq!(resolver.full_name("top").unwrap(), "Top");
    }
}
