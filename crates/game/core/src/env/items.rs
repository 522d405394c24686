/// Broad item category.
///
/// Determines where an item may go: potions are consumed, weapons/armor/
/// accessories are equipped, keys only sit in the bag.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemKind {
    Weapon,
    Armor,
    Potion,
    Accessory,
    Key,
}

impl ItemKind {
    /// Kinds the reward generator draws from.
    pub const REWARDS: [ItemKind; 4] = [
        ItemKind::Weapon,
        ItemKind::Armor,
        ItemKind::Potion,
        ItemKind::Accessory,
    ];

    pub const fn is_consumable(&self) -> bool {
        matches!(self, Self::Potion)
    }

    /// Default stack size for the kind.
    pub const fn default_max_stack(&self) -> u16 {
        match self {
            Self::Potion => 99,
            Self::Key => 1,
            Self::Weapon | Self::Armor | Self::Accessory => 1,
        }
    }
}

/// What an item does when consumed or while equipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    /// Flat attack bonus.
    Attack(u32),
    /// Flat defense bonus.
    Defense(u32),
    /// Restore health (capped at maximum).
    Heal(u32),
    /// Raise maximum health.
    MaxHealth(u32),
    /// Raise speed.
    Speed(u32),
    /// Raise chance.
    Chance(u32),
    /// Raise attack, defense, speed, agility and chance alike.
    AllStats(u32),
    None,
}

impl std::fmt::Display for ItemEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attack(v) => write!(f, "+{v} atk"),
            Self::Defense(v) => write!(f, "+{v} def"),
            Self::Heal(v) => write!(f, "+{v} hp"),
            Self::MaxHealth(v) => write!(f, "+{v} max hp"),
            Self::Speed(v) => write!(f, "+{v} speed"),
            Self::Chance(v) => write!(f, "+{v} chance"),
            Self::AllStats(v) => write!(f, "+{v} all stats"),
            Self::None => write!(f, "no effect"),
        }
    }
}

/// Item definition.
///
/// Two definitions with the same `name` and `kind` stack in an inventory.
///
/// # Stacking
///
/// - Weapons/Armor/Accessories: max_stack=1 (cannot stack)
/// - Potions: max_stack=99 (stackable)
/// - Keys: max_stack=1
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub name: String,
    pub kind: ItemKind,
    pub effect: ItemEffect,
    /// Level the item was generated for.
    pub level: u32,
    pub max_stack: u16,
}

impl ItemDefinition {
    pub fn new(name: impl Into<String>, kind: ItemKind, effect: ItemEffect) -> Self {
        Self {
            name: name.into(),
            kind,
            effect,
            level: 1,
            max_stack: kind.default_max_stack(),
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// The life potion found on board tiles and in the default bag.
    pub fn life_potion() -> Self {
        Self::new("Life Potion", ItemKind::Potion, ItemEffect::Heal(20))
    }

    /// Whether `other` can share a slot with this definition.
    pub fn stacks_with(&self, other: &ItemDefinition) -> bool {
        self.kind == other.kind && self.name == other.name
    }
}
