// Piece Values, in tenths of a pawn
pub const VAL_PAWN: i32 = 10;
pub const VAL_KNIGHT: i32 = 30;
pub const VAL_BISHOP: i32 = 32;
pub const VAL_ROOK: i32 = 50;
pub const VAL_QUEEN: i32 = 90;
pub const VAL_KING: i32 = 1000;
