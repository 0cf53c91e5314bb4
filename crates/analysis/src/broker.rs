use std::collections::HashMap;

/// # Summary
/// 券商声望分级。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrokerTier {
    /// 全球顶级投行
    S,
    /// 高声望券商
    A,
    /// 老牌或专业券商
    B,
    /// 精品与区域券商，也是未收录券商的缺省档
    C,
}

impl BrokerTier {
    /// 投资评分中的券商声誉贡献 (已含 0.20 权重)
    pub fn reputation_score(self) -> f64 {
        match self {
            BrokerTier::S => 0.20,
            BrokerTier::A => 0.15,
            BrokerTier::B => 0.10,
            BrokerTier::C => 0.05,
        }
    }

    /// 券商置信度指标中的声望分
    pub fn prestige_score(self) -> f64 {
        match self {
            BrokerTier::S => 1.0,
            BrokerTier::A => 0.8,
            BrokerTier::B => 0.6,
            BrokerTier::C => 0.4,
        }
    }
}

const TIER_S: &[&str] = &[
    "The Goldman Sachs Group",
    "Morgan Stanley",
    "JPMorgan Chase & Co.",
    "Bank of America",
    "Citigroup",
];

const TIER_A: &[&str] = &[
    "Wells Fargo & Company",
    "UBS Group",
    "Deutsche Bank Aktiengesellschaft",
    "Barclays",
    "Royal Bank of Canada",
    "HSBC",
    "BNP Paribas",
    "BMO Capital Markets",
    "Mizuho",
    "Scotiabank",
];

const TIER_B: &[&str] = &[
    "Jefferies Financial Group",
    "Raymond James",
    "Evercore ISI",
    "Piper Sandler",
    "TD Cowen",
    "Oppenheimer",
    "Stifel Nicolaus",
    "Keefe, Bruyette & Woods",
    "Cantor Fitzgerald",
    "Truist Financial",
    "Wedbush",
    "Robert W. Baird",
    "Sanford C. Bernstein",
    "CIBC",
    "Macquarie",
    "Guggenheim",
    "TD Securities",
    "Susquehanna",
];

const TIER_C: &[&str] = &[
    "HC Wainwright",
    "Stephens",
    "Roth Mkm",
    "Northland Securities",
    "Benchmark",
    "Chardan Capital",
    "B. Riley",
    "Canaccord Genuity Group",
    "Lake Street Capital",
    "Leerink Partners",
    "Loop Capital",
    "DZ Bank",
    "KeyCorp",
    "DA Davidson",
    "Lifesci Capital",
    "BWS Financial",
    "Wolfe Research",
    "Rosenblatt Securities",
    "Redburn Atlantic",
    "Telsey Advisory Group",
    "Craig Hallum",
    "Maxim Group",
    "JMP Securities",
    "Argus",
    "Compass Point",
    "LADENBURG THALM/SH SH",
    "Tigress Financial",
    "Alliance Global Partners",
    "Rodman & Renshaw",
    "Fox Advisors",
    "Glj Research",
    "Westpark Capital",
    "Hovde Group",
    "Moffett Nathanson",
    "Cfra",
    "CJS Securities",
    "Northcoast Research",
];

/// # Summary
/// 券商名称到声望分级的只读目录。
///
/// # Invariants
/// - 名称按原文精确匹配 (区分大小写)。
/// - 未收录的券商一律按 C 档处理，查询永不失败。
#[derive(Debug, Clone)]
pub struct BrokerDirectory {
    tiers: HashMap<String, BrokerTier>,
}

impl BrokerDirectory {
    /// 以内置的四档券商名单构造目录。
    pub fn standard() -> Self {
        let groups = [
            (TIER_S, BrokerTier::S),
            (TIER_A, BrokerTier::A),
            (TIER_B, BrokerTier::B),
            (TIER_C, BrokerTier::C),
        ];

        let tiers = groups
            .iter()
            .flat_map(|(names, tier)| names.iter().map(move |name| (name.to_string(), *tier)))
            .collect();

        Self { tiers }
    }

    /// 以自定义名单构造目录，供测试或定制部署使用。
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, BrokerTier)>,
        S: Into<String>,
    {
        Self {
            tiers: entries
                .into_iter()
                .map(|(name, tier)| (name.into(), tier))
                .collect(),
        }
    }

    /// 查询券商分级，未收录返回 C 档。
    pub fn tier(&self, brokerage: &str) -> BrokerTier {
        self.tiers.get(brokerage).copied().unwrap_or(BrokerTier::C)
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl Default for BrokerDirectory {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tiers() {
        let directory = BrokerDirectory::standard();
        assert_eq!(directory.tier("Morgan Stanley"), BrokerTier::S);
        assert_eq!(directory.tier("Barclays"), BrokerTier::A);
        assert_eq!(directory.tier("Keefe, Bruyette & Woods"), BrokerTier::B);
        assert_eq!(directory.tier("HC Wainwright"), BrokerTier::C);
        assert_eq!(
            directory.len(),
            TIER_S.len() + TIER_A.len() + TIER_B.len() + TIER_C.len()
        );
    }

    #[test]
    fn test_unlisted_broker_defaults_to_tier_c() {
        let directory = BrokerDirectory::standard();
        let tier = directory.tier("Some Boutique Advisors");
        assert_eq!(tier, BrokerTier::C);
        assert_eq!(tier.reputation_score(), 0.05);
        assert_eq!(tier.prestige_score(), 0.4);
        assert_eq!(directory.tier("morgan stanley"), BrokerTier::C);
    }

    #[test]
    fn test_custom_directory() {
        let directory = BrokerDirectory::from_entries([("Acme Research", BrokerTier::S)]);
        assert_eq!(directory.tier("Acme Research"), BrokerTier::S);
        assert_eq!(directory.tier("Morgan Stanley"), BrokerTier::C);
    }
}
