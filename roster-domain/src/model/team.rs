use super::{TeamId, validate_text};
use crate::error::DomainResult as Result;
use serde::{Deserialize, Serialize};

/// 文本字段的最大长度
const TEXT_MAX: usize = 60;

/// 球队实体
///
/// 以 `TeamId` 为身份标识，可变字段仅有累计胜场数。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(rename = "teamId")]
    id: TeamId,
    name: String,
    city: String,
    coach: String,
    formation: String,
    matches_won: u32,
}

impl Team {
    /// 创建新球队（生成新标识，胜场为 0）
    ///
    /// ```
    /// use roster_domain::model::Team;
    ///
    /// let team = Team::new("  Real Oviedo ", "Oviedo", "Carrion", "4-4-2").unwrap();
    /// assert_eq!(team.name(), "Real Oviedo");
    /// assert_eq!(team.matches_won(), 0);
    /// assert!(Team::new("", "Oviedo", "Carrion", "4-4-2").is_err());
    /// ```
    pub fn new(name: &str, city: &str, coach: &str, formation: &str) -> Result<Self> {
        Self::restore(TeamId::new(), name, city, coach, formation, 0)
    }

    /// 以已有标识与状态重建球队（用于从快照加载）
    pub fn restore(
        id: TeamId,
        name: &str,
        city: &str,
        coach: &str,
        formation: &str,
        matches_won: u32,
    ) -> Result<Self> {
        Ok(Self {
            id,
            name: validate_text("name", name, 1, TEXT_MAX)?,
            city: validate_text("city", city, 1, TEXT_MAX)?,
            coach: validate_text("coach", coach, 1, TEXT_MAX)?,
            formation: validate_text("formation", formation, 1, TEXT_MAX)?,
            matches_won,
        })
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn coach(&self) -> &str {
        &self.coach
    }

    pub fn formation(&self) -> &str {
        &self.formation
    }

    pub fn matches_won(&self) -> u32 {
        self.matches_won
    }

    /// 记录一场胜利
    pub fn record_win(&mut self) {
        self.matches_won = self.matches_won.saturating_add(1);
    }

    /// 重新校验（反序列化得到的实体绕过了构造函数）
    pub fn validate(&self) -> Result<()> {
        Self::restore(
            self.id,
            &self.name,
            &self.city,
            &self.coach,
            &self.formation,
            self.matches_won,
        )
        .map(|_| ())
    }

    pub fn summary(&self) -> String {
        format!(
            "Team:\n- id: {}\n- name: {}\n- city: {}\n- coach: {}\n- formation: {}\n- wins: {}",
            self.id, self.name, self.city, self.coach, self.formation, self.matches_won
        )
    }
}
