//! Dashboard figures. The numbers are fixed; nothing is computed from live data.

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
    Doughnut,
    Pie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dataset {
    pub label: &'static str,
    pub kind: ChartKind,
    pub values: [u32; 12],
}

impl Dataset {
    /// `(month, value)` pairs in calendar order.
    pub fn points(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        MONTHS.iter().copied().zip(self.values.iter().copied())
    }
}

pub const SALES: Dataset = Dataset {
    label: "Monthly Sales",
    kind: ChartKind::Bar,
    values: [120, 150, 180, 90, 200, 170, 220, 160, 190, 240, 260, 300],
};

pub const ORDERS: Dataset = Dataset {
    label: "Monthly Orders",
    kind: ChartKind::Line,
    values: [90, 110, 130, 85, 160, 140, 190, 120, 170, 210, 230, 250],
};

pub const USERS: Dataset = Dataset {
    label: "Total Users",
    kind: ChartKind::Doughnut,
    values: [20, 35, 40, 55, 60, 75, 90, 105, 130, 150, 165, 180],
};

pub const REVENUE: Dataset = Dataset {
    label: "Monthly Revenue",
    kind: ChartKind::Pie,
    values: [3000, 3200, 4000, 2800, 5000, 4800, 5500, 5200, 6000, 6500, 6700, 7000],
};

/// The four dashboard charts, in display order.
pub fn datasets() -> [Dataset; 4] {
    [SALES, ORDERS, USERS, REVENUE]
}
