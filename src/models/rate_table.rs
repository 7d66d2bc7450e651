//! Trade/role labor rate table.
//!
//! The [`RateTable`] maps a trade (e.g. "Electrical") to its skill roles and
//! their hourly rates. Unlike a `HashMap`, it keeps document order: the
//! "first role" of a trade is the first one listed, which is what the
//! self-healing fallback policy relies on.

use std::fmt;

use rust_decimal::Decimal;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// A single role and its hourly rate within a trade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRate {
    /// The role name (e.g. "Journeyman").
    pub role: String,
    /// The hourly rate for this role.
    pub hourly_rate: Decimal,
}

/// All roles defined for one trade, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeRates {
    /// The trade name (e.g. "Plumbing").
    pub trade: String,
    /// The roles of this trade, in document order.
    pub roles: Vec<RoleRate>,
}

impl TradeRates {
    fn role(&self, role: &str) -> Option<&RoleRate> {
        self.roles.iter().find(|r| r.role == role)
    }

    fn upsert(&mut self, role: &str, rate: Decimal) {
        upsert_role(&mut self.roles, role, rate);
    }
}

fn upsert_role(roles: &mut Vec<RoleRate>, role: &str, rate: Decimal) {
    match roles.iter_mut().find(|r| r.role == role) {
        Some(existing) => existing.hourly_rate = rate,
        None => roles.push(RoleRate {
            role: role.to_string(),
            hourly_rate: rate,
        }),
    }
}

/// Ordered mapping of trade → role → hourly rate.
///
/// Serializes as a nested map (`{"General": {"Journeyman": "75"}}`) and
/// preserves the order of both levels when deserializing.
///
/// # Example
///
/// ```
/// use estimate_engine::models::RateTable;
/// use rust_decimal::Decimal;
///
/// let mut table = RateTable::default();
/// table.insert("General", "Foreman", Decimal::new(85, 0));
/// table.insert("General", "Journeyman", Decimal::new(75, 0));
///
/// assert_eq!(table.rate("General", "Journeyman"), Some(Decimal::new(75, 0)));
/// assert_eq!(table.first_role("General"), Some("Foreman"));
/// assert_eq!(table.resolve_rate("Roofing", "Journeyman"), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RateTable {
    trades: Vec<TradeRates>,
}

impl RateTable {
    /// Inserts or overwrites a rate without validation.
    ///
    /// Used when building tables from trusted sources such as configuration.
    pub fn insert(&mut self, trade: &str, role: &str, rate: Decimal) {
        match self.trades.iter_mut().find(|t| t.trade == trade) {
            Some(existing) => existing.upsert(role, rate),
            None => self.trades.push(TradeRates {
                trade: trade.to_string(),
                roles: vec![RoleRate {
                    role: role.to_string(),
                    hourly_rate: rate,
                }],
            }),
        }
    }

    /// Sets the rate for a trade/role, rejecting negative rates.
    ///
    /// Unknown trades are ignored, matching how rate edits only ever target
    /// trades the table already knows about.
    pub fn set_rate(&mut self, trade: &str, role: &str, rate: Decimal) -> EngineResult<()> {
        if rate < Decimal::ZERO {
            return Err(EngineError::InvalidRate {
                trade: trade.to_string(),
                role: role.to_string(),
                rate,
            });
        }
        if let Some(existing) = self.trades.iter_mut().find(|t| t.trade == trade) {
            existing.upsert(role, rate);
        }
        Ok(())
    }

    /// Adds a skill level to each of the given trades.
    ///
    /// Trades not present in the table are skipped.
    pub fn add_role(&mut self, trades: &[String], role: &str, rate: Decimal) -> EngineResult<()> {
        for trade in trades {
            self.set_rate(trade, role, rate)?;
        }
        Ok(())
    }

    /// Removes a role from a trade, returning whether it existed.
    pub fn remove_role(&mut self, trade: &str, role: &str) -> bool {
        let Some(existing) = self.trades.iter_mut().find(|t| t.trade == trade) else {
            return false;
        };
        let before = existing.roles.len();
        existing.roles.retain(|r| r.role != role);
        existing.roles.len() != before
    }

    /// Rewrites every rate in place with `f`.
    pub fn map_rates(&mut self, f: impl Fn(Decimal) -> Decimal) {
        for role in self.trades.iter_mut().flat_map(|t| t.roles.iter_mut()) {
            role.hourly_rate = f(role.hourly_rate);
        }
    }

    /// Returns the rate for a trade/role if both exist.
    pub fn rate(&self, trade: &str, role: &str) -> Option<Decimal> {
        self.trade(trade)
            .and_then(|t| t.role(role))
            .map(|r| r.hourly_rate)
    }

    /// Returns the rate for a trade/role, or zero when either is missing.
    pub fn resolve_rate(&self, trade: &str, role: &str) -> Decimal {
        self.rate(trade, role).unwrap_or(Decimal::ZERO)
    }

    /// Returns true if the trade is present in the table.
    pub fn has_trade(&self, trade: &str) -> bool {
        self.trade(trade).is_some()
    }

    /// Iterates trade names in document order.
    pub fn trades(&self) -> impl Iterator<Item = &str> {
        self.trades.iter().map(|t| t.trade.as_str())
    }

    /// Iterates the role names of a trade in document order.
    pub fn roles(&self, trade: &str) -> impl Iterator<Item = &str> {
        self.trade(trade)
            .into_iter()
            .flat_map(|t| t.roles.iter().map(|r| r.role.as_str()))
    }

    /// Returns the first role listed for a trade.
    pub fn first_role(&self, trade: &str) -> Option<&str> {
        self.roles(trade).next()
    }

    /// Returns the union of all roles across all trades, first-seen order.
    pub fn all_roles(&self) -> Vec<String> {
        let mut roles: Vec<String> = Vec::new();
        for trade in &self.trades {
            for role in &trade.roles {
                if !roles.contains(&role.role) {
                    roles.push(role.role.clone());
                }
            }
        }
        roles
    }

    /// Iterates every (trade, role, rate) triple in document order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, Decimal)> {
        self.trades.iter().flat_map(|t| {
            t.roles
                .iter()
                .map(move |r| (t.trade.as_str(), r.role.as_str(), r.hourly_rate))
        })
    }

    /// Returns true if the table contains no trades.
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    fn trade(&self, trade: &str) -> Option<&TradeRates> {
        self.trades.iter().find(|t| t.trade == trade)
    }
}

struct RolesMap<'a>(&'a [RoleRate]);

impl Serialize for RolesMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for role in self.0 {
            map.serialize_entry(&role.role, &role.hourly_rate)?;
        }
        map.end()
    }
}

impl Serialize for RateTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.trades.len()))?;
        for trade in &self.trades {
            map.serialize_entry(&trade.trade, &RolesMap(&trade.roles))?;
        }
        map.end()
    }
}

struct OrderedRoles(Vec<RoleRate>);

impl<'de> Deserialize<'de> for OrderedRoles {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RolesVisitor;

        impl<'de> Visitor<'de> for RolesVisitor {
            type Value = OrderedRoles;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of role name to hourly rate")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut roles = Vec::new();
                while let Some((role, rate)) = access.next_entry::<String, Decimal>()? {
                    upsert_role(&mut roles, &role, rate);
                }
                Ok(OrderedRoles(roles))
            }
        }

        deserializer.deserialize_map(RolesVisitor)
    }
}

impl<'de> Deserialize<'de> for RateTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = RateTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of trade name to role rates")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut table = RateTable::default();
                while let Some((trade, roles)) = access.next_entry::<String, OrderedRoles>()? {
                    // A repeated trade key replaces the earlier definition in place.
                    match table.trades.iter_mut().find(|t| t.trade == trade) {
                        Some(existing) => existing.roles = roles.0,
                        None => table.trades.push(TradeRates {
                            trade,
                            roles: roles.0,
                        }),
                    }
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}
