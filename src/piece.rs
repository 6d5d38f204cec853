use strum::{Display, EnumString, IntoStaticStr, VariantArray};

use crate::connections::Connections;

/// The fixed catalog of wiring patterns.
///
/// String forms match the catalog identifiers, e.g. `"straight_h"` or `"t_shape_w"`.
#[derive(Copy, Clone, Default, VariantArray, Display, EnumString, IntoStaticStr, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
#[strum(serialize_all = "snake_case")]
pub enum PieceType {
    /// East and west.
    StraightH,
    /// North and south.
    #[default]
    StraightV,
    /// North and east.
    CornerNe,
    /// East and south.
    CornerSe,
    /// South and west.
    CornerSw,
    /// North and west.
    CornerNw,
    /// All four sides.
    Cross,
    /// Every side but south.
    TShapeN,
    /// Every side but west.
    TShapeE,
    /// Every side but north.
    TShapeS,
    /// Every side but east.
    TShapeW,
}

const N: bool = true;
const E: bool = true;
const S: bool = true;
const W: bool = true;
const X: bool = false;

// indexed by discriminant; order must follow the enum
const CATALOG: [Connections; 11] = [
    Connections::from_array([X, E, X, W]),
    Connections::from_array([N, X, S, X]),
    Connections::from_array([N, E, X, X]),
    Connections::from_array([X, E, S, X]),
    Connections::from_array([X, X, S, W]),
    Connections::from_array([N, X, X, W]),
    Connections::from_array([N, E, S, W]),
    Connections::from_array([N, E, X, W]),
    Connections::from_array([N, E, S, X]),
    Connections::from_array([X, E, S, W]),
    Connections::from_array([N, X, S, W]),
];

impl PieceType {
    /// The unrotated wiring of this piece.
    pub fn connections(&self) -> Connections {
        CATALOG[*self as usize]
    }

    /// The catalog identifier, e.g. `"corner_ne"`.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// The unrotated wiring of `piece`.
pub fn connections_of(piece: PieceType) -> Connections {
    piece.connections()
}
