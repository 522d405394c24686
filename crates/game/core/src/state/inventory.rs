//! Bag of stackable item slots.

use crate::config::GameConfig;
use crate::env::ItemDefinition;
use crate::error::{ErrorSeverity, GameError};

use super::EquipSlot;

/// Inventory slot containing an item and its quantity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventorySlot {
    pub item: ItemDefinition,
    pub quantity: u16,
}

impl InventorySlot {
    pub fn new(item: ItemDefinition, quantity: u16) -> Self {
        Self { item, quantity }
    }

    fn room(&self) -> u16 {
        self.item.max_stack.saturating_sub(self.quantity)
    }
}

/// Errors raised by inventory and equipment operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryError {
    #[error("inventory is full ({capacity} slots)")]
    InventoryFull { capacity: usize },

    #[error("item not found: {0}")]
    ItemNotFound(String),

    #[error("not enough {name}: requested {requested}, have {available}")]
    InsufficientQuantity {
        name: String,
        requested: u32,
        available: u32,
    },

    #[error("{0} cannot be consumed")]
    NotConsumable(String),

    #[error("{0} cannot be equipped")]
    NotEquippable(String),

    #[error("nothing equipped in the {0} slot")]
    NothingEquipped(EquipSlot),

    #[error("quantity must be at least 1")]
    ZeroQuantity,
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InventoryFull { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InventoryFull { .. } => "INVENTORY_FULL",
            Self::ItemNotFound(_) => "INVENTORY_ITEM_NOT_FOUND",
            Self::InsufficientQuantity { .. } => "INVENTORY_INSUFFICIENT_QUANTITY",
            Self::NotConsumable(_) => "INVENTORY_NOT_CONSUMABLE",
            Self::NotEquippable(_) => "INVENTORY_NOT_EQUIPPABLE",
            Self::NothingEquipped(_) => "INVENTORY_NOTHING_EQUIPPED",
            Self::ZeroQuantity => "INVENTORY_ZERO_QUANTITY",
        }
    }
}

/// Capacity-bounded list of item stacks.
///
/// Every mutating operation either succeeds completely or leaves the
/// inventory untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    capacity: usize,
    slots: Vec<InventorySlot>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(GameConfig::DEFAULT_INVENTORY_SLOTS)
    }
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Vec::new(),
        }
    }

    /// Bag with two life potions.
    pub fn starter(capacity: usize) -> Self {
        let mut bag = Self::new(capacity);
        if bag.add(ItemDefinition::life_potion(), 2).is_err() {
            tracing::warn!("starter bag has no room for potions (capacity {capacity})");
        }
        bag
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn slots(&self) -> &[InventorySlot] {
        &self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    pub fn free_slots(&self) -> usize {
        self.capacity.saturating_sub(self.slots.len())
    }

    /// Total quantity held under `name`.
    pub fn count(&self, name: &str) -> u32 {
        self.slots
            .iter()
            .filter(|slot| slot.item.name == name)
            .map(|slot| slot.quantity as u32)
            .sum()
    }

    pub fn find(&self, name: &str) -> Option<&ItemDefinition> {
        self.slots
            .iter()
            .find(|slot| slot.item.name == name)
            .map(|slot| &slot.item)
    }

    /// Whether `quantity` of `item` would fit.
    pub fn can_add(&self, item: &ItemDefinition, quantity: u16) -> bool {
        let max_stack = item.max_stack.max(1) as u32;
        let stacked: u32 = self
            .slots
            .iter()
            .filter(|slot| slot.item.stacks_with(item))
            .map(|slot| slot.room() as u32)
            .sum();
        let remaining = (quantity as u32).saturating_sub(stacked);
        let needed = remaining.div_ceil(max_stack) as usize;
        needed <= self.free_slots()
    }

    /// Add `quantity` copies, topping up existing stacks before opening
    /// new slots.
    pub fn add(&mut self, item: ItemDefinition, quantity: u16) -> Result<(), InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::ZeroQuantity);
        }
        if !self.can_add(&item, quantity) {
            return Err(InventoryError::InventoryFull {
                capacity: self.capacity,
            });
        }

        let mut remaining = quantity;
        for slot in self.slots.iter_mut().filter(|slot| slot.item.stacks_with(&item)) {
            let moved = slot.room().min(remaining);
            slot.quantity += moved;
            remaining -= moved;
            if remaining == 0 {
                return Ok(());
            }
        }

        let max_stack = item.max_stack.max(1);
        while remaining > 0 {
            let moved = remaining.min(max_stack);
            self.slots.push(InventorySlot::new(item.clone(), moved));
            remaining -= moved;
        }
        Ok(())
    }

    /// Remove `quantity` of `name`, newest stacks first. Emptied slots are
    /// dropped.
    pub fn remove(&mut self, name: &str, quantity: u16) -> Result<(), InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::ZeroQuantity);
        }
        let available = self.count(name);
        if available == 0 {
            return Err(InventoryError::ItemNotFound(name.to_owned()));
        }
        if available < quantity as u32 {
            return Err(InventoryError::InsufficientQuantity {
                name: name.to_owned(),
                requested: quantity as u32,
                available,
            });
        }

        let mut remaining = quantity;
        for slot in self
            .slots
            .iter_mut()
            .rev()
            .filter(|slot| slot.item.name == name)
        {
            let taken = slot.quantity.min(remaining);
            slot.quantity -= taken;
            remaining -= taken;
            if remaining == 0 {
                break;
            }
        }
        self.slots.retain(|slot| slot.quantity > 0);
        Ok(())
    }

    /// Remove one `name` and return its definition.
    pub fn take(&mut self, name: &str) -> Result<ItemDefinition, InventoryError> {
        let item = self
            .slots
            .iter()
            .rev()
            .find(|slot| slot.item.name == name)
            .map(|slot| slot.item.clone())
            .ok_or_else(|| InventoryError::ItemNotFound(name.to_owned()))?;
        self.remove(name, 1)?;
        Ok(item)
    }

    /// Rename every stack called `from`.
    pub fn rename(&mut self, from: &str, to: impl Into<String>) -> Result<(), InventoryError> {
        let to = to.into();
        let mut found = false;
        for slot in self.slots.iter_mut().filter(|slot| slot.item.name == from) {
            slot.item.name = to.clone();
            found = true;
        }
        if found {
            Ok(())
        } else {
            Err(InventoryError::ItemNotFound(from.to_owned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ItemEffect, ItemKind};

    fn sword() -> ItemDefinition {
        ItemDefinition::new("Sword", ItemKind::Weapon, ItemEffect::Attack(4))
    }

    #[test]
    fn potions_stack_weapons_do_not() {
        let mut bag = Inventory::new(5);
        bag.add(ItemDefinition::life_potion(), 3).unwrap();
        bag.add(ItemDefinition::life_potion(), 2).unwrap();
        bag.add(sword(), 2).unwrap();

        assert_eq!(bag.slots().len(), 3);
        assert_eq!(bag.count("Life Potion"), 5);
        assert_eq!(bag.count("Sword"), 2);
    }

    #[test]
    fn full_bag_is_left_unchanged() {
        let mut bag = Inventory::new(1);
        bag.add(sword(), 1).unwrap();
        let before = bag.clone();

        assert_eq!(
            bag.add(sword(), 1),
            Err(InventoryError::InventoryFull { capacity: 1 })
        );
        assert_eq!(bag, before);
    }

    #[test]
    fn remove_drops_empty_slots() {
        let mut bag = Inventory::new(3);
        bag.add(ItemDefinition::life_potion(), 2).unwrap();

        assert_eq!(
            bag.remove("Life Potion", 3),
            Err(InventoryError::InsufficientQuantity {
                name: "Life Potion".into(),
                requested: 3,
                available: 2
            })
        );
        bag.remove("Life Potion", 2).unwrap();
        assert!(bag.is_empty());
        assert_eq!(
            bag.remove("Life Potion", 1),
            Err(InventoryError::ItemNotFound("Life Potion".into()))
        );
    }

    #[test]
    fn rename_and_zero_quantity() {
        let mut bag = Inventory::new(2);
        bag.add(sword(), 1).unwrap();
        bag.rename("Sword", "Excalibur").unwrap();
        assert!(bag.find("Excalibur").is_some());
        assert_eq!(bag.add(sword(), 0), Err(InventoryError::ZeroQuantity));
        assert!(bag.rename("Sword", "x").is_err());
    }

    #[test]
    fn starter_bag_has_two_potions() {
        let bag = Inventory::starter(GameConfig::DEFAULT_INVENTORY_SLOTS);
        assert_eq!(bag.count("Life Potion"), 2);
        assert_eq!(bag.slots().len(), 1);
    }
}
