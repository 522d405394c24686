//! Persistent character record.

use crate::env::{
    ArchetypeError, ArchetypeTable, Class, ItemDefinition, ItemEffect, ItemKind, Race, StatLine,
};
use crate::stats::{Combatant, ExtendedStats};

use super::inventory::{Inventory, InventoryError};

/// Stable identifier of a character. Allocation belongs to the store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u32);

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Equipment slot an item occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EquipSlot {
    Weapon,
    Armor,
    Accessory,
}

impl EquipSlot {
    pub const fn for_kind(kind: ItemKind) -> Option<Self> {
        match kind {
            ItemKind::Weapon => Some(Self::Weapon),
            ItemKind::Armor => Some(Self::Armor),
            ItemKind::Accessory => Some(Self::Accessory),
            ItemKind::Potion | ItemKind::Key => None,
        }
    }
}

/// Equipped items, one per slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub weapon: Option<ItemDefinition>,
    pub armor: Option<ItemDefinition>,
    pub accessory: Option<ItemDefinition>,
}

impl Equipment {
    pub fn slot(&self, slot: EquipSlot) -> Option<&ItemDefinition> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_ref(),
            EquipSlot::Armor => self.armor.as_ref(),
            EquipSlot::Accessory => self.accessory.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<ItemDefinition> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
            EquipSlot::Accessory => &mut self.accessory,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        [&self.weapon, &self.armor, &self.accessory]
            .into_iter()
            .flatten()
    }

    /// Flat bonuses granted by everything equipped.
    pub fn bonuses(&self) -> (StatLine, ExtendedStats) {
        let mut line = StatLine::default();
        let mut extended = ExtendedStats::ZERO;
        for item in self.iter() {
            match item.effect {
                ItemEffect::Attack(v) => line.attack = line.attack.saturating_add(v),
                ItemEffect::Defense(v) => line.defense = line.defense.saturating_add(v),
                ItemEffect::MaxHealth(v) => line.health = line.health.saturating_add(v),
                ItemEffect::Speed(v) => extended = extended.combine(&ExtendedStats::new(v, 0, 0)),
                ItemEffect::Chance(v) => extended = extended.combine(&ExtendedStats::new(0, 0, v)),
                ItemEffect::AllStats(v) => {
                    line.attack = line.attack.saturating_add(v);
                    line.defense = line.defense.saturating_add(v);
                    extended = extended.combine(&ExtendedStats::new(v, v, v));
                }
                ItemEffect::Heal(_) | ItemEffect::None => {}
            }
        }
        (line, extended)
    }
}

/// Lifetime fight and quest counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRecord {
    pub battles_won: u32,
    pub battles_lost: u32,
    pub quests_completed: u32,
    pub monsters_defeated: u32,
    pub items_collected: u32,
}

impl BattleRecord {
    pub fn record_fight(&mut self, won: bool) {
        if won {
            self.battles_won = self.battles_won.saturating_add(1);
        } else {
            self.battles_lost = self.battles_lost.saturating_add(1);
        }
    }
}

/// Character as stored between fights.
///
/// Fights never touch a sheet directly: they run on the snapshot from
/// [`to_combatant`](Self::to_combatant) and the caller commits results
/// through the progression and quest rules.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSheet {
    pub id: CharacterId,
    pub name: String,
    pub race: Race,
    pub class: Class,
    /// Always at least 1.
    pub level: u32,
    /// Cumulative over the character's lifetime.
    pub experience: u32,
    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub extended: ExtendedStats,
    pub gold: u32,
    pub inventory: Inventory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Equipment,
    #[cfg_attr(feature = "serde", serde(default))]
    pub record: BattleRecord,
    /// Quest ids this character has already cleared.
    #[cfg_attr(feature = "serde", serde(default))]
    pub completed_quests: Vec<u32>,
}

impl CharacterSheet {
    /// Level 1 character with starting stats from the race/class table.
    pub fn create(
        id: CharacterId,
        name: impl Into<String>,
        race: Race,
        class: Class,
        archetypes: &ArchetypeTable,
    ) -> Result<Self, ArchetypeError> {
        let archetype = archetypes.archetype(race, class)?;
        Ok(Self {
            id,
            name: name.into(),
            race,
            class,
            level: 1,
            experience: 0,
            health: archetype.max_health,
            max_health: archetype.max_health,
            attack: archetype.attack,
            defense: archetype.defense,
            extended: archetype.extended,
            gold: 0,
            inventory: Inventory::default(),
            equipment: Equipment::default(),
            record: BattleRecord::default(),
            completed_quests: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn has_completed(&self, quest_id: u32) -> bool {
        self.completed_quests.contains(&quest_id)
    }

    /// Fresh fight snapshot including equipment bonuses.
    pub fn to_combatant(&self) -> Combatant {
        let (bonus, extended) = self.equipment.bonuses();
        Combatant::new(
            &self.name,
            self.max_health.saturating_add(bonus.health),
            self.attack.saturating_add(bonus.attack),
            self.defense.saturating_add(bonus.defense),
        )
        .with_health(self.health)
        .with_extended(self.extended.combine(&extended))
    }

    /// Heal by `amount`, capped at the maximum. Returns health restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health.saturating_sub(before)
    }

    /// Use one consumable from the bag and apply its effect.
    pub fn consume(&mut self, name: &str) -> Result<ItemEffect, InventoryError> {
        let item = self
            .inventory
            .find(name)
            .ok_or_else(|| InventoryError::ItemNotFound(name.to_owned()))?;
        if !item.kind.is_consumable() {
            return Err(InventoryError::NotConsumable(name.to_owned()));
        }

        let item = self.inventory.take(name)?;
        match item.effect {
            ItemEffect::Heal(amount) => {
                let healed = self.heal(amount);
                tracing::debug!("{} drinks {} (+{healed} hp)", self.name, item.name);
            }
            ItemEffect::MaxHealth(amount) => {
                self.max_health = self.max_health.saturating_add(amount);
                self.health = self.health.saturating_add(amount);
            }
            other => tracing::debug!("{} consumed {} with no lasting effect ({other})", self.name, item.name),
        }
        Ok(item.effect)
    }

    /// Move an item from the bag into its equipment slot. The item it
    /// replaces goes back into the bag and is returned.
    pub fn equip(&mut self, name: &str) -> Result<Option<ItemDefinition>, InventoryError> {
        let item = self
            .inventory
            .find(name)
            .ok_or_else(|| InventoryError::ItemNotFound(name.to_owned()))?;
        let slot = EquipSlot::for_kind(item.kind)
            .ok_or_else(|| InventoryError::NotEquippable(name.to_owned()))?;

        let mut inventory = self.inventory.clone();
        let item = inventory.take(name)?;
        let previous = self.equipment.slot(slot).cloned();
        if let Some(previous) = &previous {
            inventory.add(previous.clone(), 1)?;
        }

        self.inventory = inventory;
        *self.equipment.slot_mut(slot) = Some(item);
        Ok(previous)
    }

    /// Return the item in `slot` to the bag.
    pub fn unequip(&mut self, slot: EquipSlot) -> Result<ItemDefinition, InventoryError> {
        let item = self
            .equipment
            .slot(slot)
            .cloned()
            .ok_or(InventoryError::NothingEquipped(slot))?;
        self.inventory.add(item.clone(), 1)?;
        *self.equipment.slot_mut(slot) = None;
        Ok(item)
    }
}
