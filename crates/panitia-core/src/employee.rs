//! Employee records — the immutable directory entries staff search for.
//!
//! The dataset stores every record flat (`sector`, `department`, `division`,
//! `position` side by side). In memory a record carries exactly one of the
//! two placement shapes, so a position holder can never grow a department.

use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Placement ───────────────────────────────────────────────────────────────

/// Where an employee sits in the organisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
  /// Regular staff, placed by sector, department and division.
  Staff {
    sector:     String,
    department: String,
    division:   String,
  },
  /// Leadership roles (e.g. "PM", "DPM") carry only a position title.
  Leadership { position: String },
}

// ─── Employee ────────────────────────────────────────────────────────────────

/// One entry of the static employee directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEmployee", into = "RawEmployee")]
pub struct Employee {
  pub id:        String,
  /// Short (call) name, e.g. "Budi".
  pub name:      String,
  pub full_name: String,
  pub placement: Placement,
}

impl Employee {
  pub fn sector(&self) -> Option<&str> {
    match &self.placement {
      Placement::Staff { sector, .. } => non_empty(sector),
      Placement::Leadership { .. } => None,
    }
  }

  pub fn department(&self) -> Option<&str> {
    match &self.placement {
      Placement::Staff { department, .. } => non_empty(department),
      Placement::Leadership { .. } => None,
    }
  }

  pub fn division(&self) -> Option<&str> {
    match &self.placement {
      Placement::Staff { division, .. } => non_empty(division),
      Placement::Leadership { .. } => None,
    }
  }

  pub fn position(&self) -> Option<&str> {
    match &self.placement {
      Placement::Leadership { position } => non_empty(position),
      Placement::Staff { .. } => None,
    }
  }

  /// One-line organisational summary shown under a lookup hit.
  pub fn placement_label(&self) -> String {
    match &self.placement {
      Placement::Leadership { position } => position.clone(),
      Placement::Staff { department, division, .. } => {
        format!("{department} - {division}")
      }
    }
  }
}

fn non_empty(s: &str) -> Option<&str> {
  if s.is_empty() { None } else { Some(s) }
}

// ─── Wire shape ──────────────────────────────────────────────────────────────

/// The flat record shape used by the JSON dataset and the HTTP API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEmployee {
  pub id:         String,
  pub name:       String,
  pub full_name:  String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sector:     Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub department: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub division:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub position:   Option<String>,
}

impl TryFrom<RawEmployee> for Employee {
  type Error = Error;

  fn try_from(raw: RawEmployee) -> Result<Self, Self::Error> {
    let position = raw.position.filter(|p| !p.trim().is_empty());
    let department = raw.department.filter(|d| !d.trim().is_empty());

    let placement = match (position, department) {
      (Some(position), _) => Placement::Leadership { position },
      (None, Some(department)) => Placement::Staff {
        sector: raw.sector.unwrap_or_default(),
        department,
        division: raw.division.unwrap_or_default(),
      },
      (None, None) => return Err(Error::MissingPlacement(raw.id)),
    };

    Ok(Employee {
      id: raw.id,
      name: raw.name,
      full_name: raw.full_name,
      placement,
    })
  }
}

impl From<Employee> for RawEmployee {
  fn from(e: Employee) -> Self {
    match e.placement {
      Placement::Staff { sector, department, division } => RawEmployee {
        id:         e.id,
        name:       e.name,
        full_name:  e.full_name,
        sector:     Some(sector),
        department: Some(department),
        division:   Some(division),
        position:   None,
      },
      Placement::Leadership { position } => RawEmployee {
        id:         e.id,
        name:       e.name,
        full_name:  e.full_name,
        sector:     None,
        department: None,
        division:   None,
        position:   Some(position),
      },
    }
  }
}
