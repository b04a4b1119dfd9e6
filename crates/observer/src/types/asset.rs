// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Token standard / category of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetType {
    Native,
    Erc20,
    Psp22,
    Local,
    Grc20,
    Vft,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Native => "NATIVE",
            AssetType::Erc20 => "ERC20",
            AssetType::Psp22 => "PSP22",
            AssetType::Local => "LOCAL",
            AssetType::Grc20 => "GRC20",
            AssetType::Vft => "VFT",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDescriptor {
    pub slug: String,
    pub origin_chain: String,
    pub asset_type: AssetType,
    #[serde(default)]
    pub decimals: u8,
    /// Existential deposit / minimum balance in the smallest unit.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub min_amount: u128,
    /// Pallet-level asset id (pallet-assets index, Equilibrium asset id).
    #[serde(default)]
    pub asset_id: Option<String>,
    /// Structured currency id for ORML-style pallets, e.g. `{"Token": "KSM"}`.
    #[serde(default)]
    pub on_chain_info: Option<Value>,
    #[serde(default)]
    pub contract_address: Option<String>,
    /// XCM location of a bridged asset.
    #[serde(default)]
    pub multilocation: Option<Value>,
    #[serde(default)]
    pub is_bridged: bool,
    #[serde(default)]
    pub symbol: String,
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<u128, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(u128),
        Text(String),
    }

    match Option::<Amount>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Amount::Number(n)) => Ok(n),
        Some(Amount::Text(s)) if s.is_empty() => Ok(0),
        Some(Amount::Text(s)) => s.parse().map_err(serde::de::Error::custom),
    }
}

impl AssetDescriptor {
    pub fn new(slug: impl Into<String>, origin_chain: impl Into<String>, asset_type: AssetType) -> Self {
        Self {
            slug: slug.into(),
            origin_chain: origin_chain.into(),
            asset_type,
            decimals: 0,
            min_amount: 0,
            asset_id: None,
            on_chain_info: None,
            contract_address: None,
            multilocation: None,
            is_bridged: false,
            symbol: String::new(),
        }
    }
}

/// Read-only snapshot of asset descriptors keyed by slug.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    assets: BTreeMap<String, AssetDescriptor>,
}

impl AssetRegistry {
    pub fn from_assets(assets: impl IntoIterator<Item = AssetDescriptor>) -> Self {
        Self {
            assets: assets
                .into_iter()
                .map(|asset| (asset.slug.clone(), asset))
                .collect(),
        }
    }

    pub fn get(&self, slug: &str) -> Option<&AssetDescriptor> {
        self.assets.get(slug)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetDescriptor> {
        self.assets.values()
    }

    /// Assets originating on `chain` whose type is one of `types`, ordered by slug.
    pub fn filter_by_chain_and_type(&self, chain: &str, types: &[AssetType]) -> Vec<&AssetDescriptor> {
        self.assets
            .values()
            .filter(|asset| asset.origin_chain == chain && types.contains(&asset.asset_type))
            .collect()
    }

    /// Snapshot restricted to the given slugs; `None` keeps every asset.
    pub fn restrict_to(&self, slugs: Option<&[String]>) -> Self {
        match slugs {
            None => self.clone(),
            Some(slugs) => Self {
                assets: self
                    .assets
                    .iter()
                    .filter(|(slug, _)| slugs.contains(slug))
                    .map(|(slug, asset)| (slug.clone(), asset.clone()))
                    .collect(),
            },
        }
    }
}
