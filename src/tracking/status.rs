//! The order status state machine.
//!
//! Orders move monotonically through a fixed four-step pipeline:
//! `pending -> preparing -> in_transit -> delivered`. Everything here is a
//! pure function of the raw status string. Unknown status values fall back
//! to the earliest pipeline step rather than raising an error.

/// Position of an order in the delivery pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Preparing,
    InTransit,
    Delivered,
}

/// The fixed pipeline, in order. The last step is terminal.
pub const PIPELINE: [OrderStatus; 4] = [
    OrderStatus::Pending,
    OrderStatus::Preparing,
    OrderStatus::InTransit,
    OrderStatus::Delivered,
];

/// Icon category for a pipeline step. Purely presentational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    Package,
    ChefHat,
    Truck,
    CheckCircle,
}

/// Human-facing presentation of a pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPresentation {
    pub label: &'static str,
    pub headline: &'static str,
    pub detail: &'static str,
    pub icon: StatusIcon,
}

impl OrderStatus {
    /// Strict parse of a raw status string.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Self::Pending),
            "preparing" => Some(Self::Preparing),
            "in_transit" => Some(Self::InTransit),
            "delivered" => Some(Self::Delivered),
            _ => None,
        }
    }

    /// Lenient parse: unknown strings map to the start of the pipeline.
    /// This is a deliberate fail-closed default, not an error.
    pub fn parse_lenient(raw: &str) -> Self {
        Self::parse(raw).unwrap_or(Self::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
        }
    }

    /// Index of this status in the pipeline. Steps at or before this index
    /// render as complete, later steps as pending.
    pub fn step_index(self) -> usize {
        match self {
            Self::Pending => 0,
            Self::Preparing => 1,
            Self::InTransit => 2,
            Self::Delivered => 3,
        }
    }

    /// Whether the driver-position simulation should run: only while the
    /// order is being prepared or on the road. The driver has not been
    /// dispatched while pending, and has arrived once delivered.
    pub fn simulation_active(self) -> bool {
        matches!(self, Self::Preparing | Self::InTransit)
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Delivered
    }

    pub fn presentation(self) -> StatusPresentation {
        match self {
            Self::Pending => StatusPresentation {
                label: "Order Placed",
                headline: "Order Received",
                detail: "We'll start preparing it shortly",
                icon: StatusIcon::Package,
            },
            Self::Preparing => StatusPresentation {
                label: "Preparing",
                headline: "Preparing your order",
                detail: "Our chefs are crafting your treats",
                icon: StatusIcon::ChefHat,
            },
            Self::InTransit => StatusPresentation {
                label: "On the Way",
                headline: "Your order is on the way!",
                detail: "Estimated arrival in 15-25 minutes",
                icon: StatusIcon::Truck,
            },
            Self::Delivered => StatusPresentation {
                label: "Delivered",
                headline: "Order Delivered!",
                detail: "Thank you for ordering from Home Bakery",
                icon: StatusIcon::CheckCircle,
            },
        }
    }
}

/// Pipeline index for a raw status string; unknown values map to 0.
pub fn step_index(raw: &str) -> usize {
    OrderStatus::parse_lenient(raw).step_index()
}

/// Whether simulation should run for a raw status string; false for unknown
/// values (an undispatched driver is the safe assumption).
pub fn simulation_active(raw: &str) -> bool {
    OrderStatus::parse_lenient(raw).simulation_active()
}

/// Presentation for a raw status string; unknown values render the pending
/// card, never an error.
pub fn presentation(raw: &str) -> StatusPresentation {
    OrderStatus::parse_lenient(raw).presentation()
}
