use std::collections::BTreeMap;

use super::error::{LedgerError, LedgerResult};

/// Allowed account types.
///
/// The first segment of every account name selects one of these.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum AccountType {
    Assets,
    Liabilities,
    Equity,
    Income,
    Expenses,
}

impl AccountType {
    pub const ALL: [AccountType; 5] = [
        AccountType::Assets,
        AccountType::Liabilities,
        AccountType::Equity,
        AccountType::Income,
        AccountType::Expenses,
    ];

    /// Root segment used when no `name_*` option renames it.
    pub fn default_name(&self) -> &'static str {
        match self {
            AccountType::Assets => "Assets",
            AccountType::Liabilities => "Liabilities",
            AccountType::Equity => "Equity",
            AccountType::Income => "Income",
            AccountType::Expenses => "Expenses",
        }
    }

    /// Name of the option that renames this root, e.g. `name_assets`.
    pub fn option_name(&self) -> &'static str {
        match self {
            AccountType::Assets => "name_assets",
            AccountType::Liabilities => "name_liabilities",
            AccountType::Equity => "name_equity",
            AccountType::Income => "name_income",
            AccountType::Expenses => "name_expenses",
        }
    }
}

/// The root segment names currently recognized for each account type.
///
/// Ledgers written in other languages rename the roots with options:
///
/// ```text
/// option "name_assets" "Aktiva"
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RootNames {
    names: BTreeMap<AccountType, String>,
}

impl Default for RootNames {
    fn default() -> Self {
        RootNames {
            names: AccountType::ALL
                .iter()
                .map(|ty| (*ty, ty.default_name().to_string()))
                .collect(),
        }
    }
}

impl RootNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives `ty` a new root segment. A name another type still holds is refused, so
    /// every root segment maps to exactly one type.
    pub fn rename(&mut self, ty: AccountType, name: impl Into<String>) -> LedgerResult<()> {
        let name = name.into();
        if let Some(holder) = self.account_type(&name).filter(|holder| *holder != ty) {
            return Err(LedgerError::RootNameTaken { name, holder });
        }
        self.names.insert(ty, name);
        Ok(())
    }

    pub fn name_of(&self, ty: AccountType) -> &str {
        self.names
            .get(&ty)
            .map(String::as_str)
            .unwrap_or_else(|| ty.default_name())
    }

    /// Account type whose root segment is `segment`, if any.
    pub fn account_type(&self, segment: &str) -> Option<AccountType> {
        self.names
            .iter()
            .find(|(_, name)| name.as_str() == segment)
            .map(|(ty, _)| *ty)
    }
}
