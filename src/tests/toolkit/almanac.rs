/// One Almanac column, angles in degrees
#[derive(Debug, Clone)]
pub struct AlmanacColumn {
    pub id: String,
    pub health: f64,
    pub e: f64,
    pub sqrt_a: f64,
    pub omega_0: f64,
    pub omega: f64,
    pub m_0: f64,
    pub toe: f64,
    pub delta_i: f64,
    pub omega_dot: f64,
    pub af0: f64,
    pub af1: f64,
    pub week: f64,
}

impl AlmanacColumn {
    /// Typical GPS vehicle, reference week 2200
    pub fn gps(id: u16) -> Self {
        Self {
            id: id.to_string(),
            health: 0.0,
            e: 0.01,
            sqrt_a: 5153.6,
            omega_0: 10.0,
            omega: -90.0,
            m_0: 180.0,
            toe: 589824.0,
            delta_i: 1.0,
            omega_dot: -0.45,
            af0: 1.0E-4,
            af1: 0.0,
            week: 2200.0,
        }
    }

    fn rows(&self) -> [String; 13] {
        [
            self.id.clone(),
            self.health.to_string(),
            self.e.to_string(),
            self.sqrt_a.to_string(),
            self.omega_0.to_string(),
            self.omega.to_string(),
            self.m_0.to_string(),
            self.toe.to_string(),
            self.delta_i.to_string(),
            self.omega_dot.to_string(),
            self.af0.to_string(),
            self.af1.to_string(),
            self.week.to_string(),
        ]
    }
}

/*
 * Generates one Almanac block per group of columns
 */
pub fn almanac(blocks: &[Vec<AlmanacColumn>]) -> String {
    let mut content = String::new();
    for block in blocks {
        let rows = block.iter().map(|col| col.rows()).collect::<Vec<_>>();
        for row in 0..13 {
            for col in rows.iter() {
                content.push_str(&format!("{:<10}", col[row]));
            }
            content.push('\n');
        }
        content.push('\n');
    }
    content
}
