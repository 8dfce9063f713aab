use crate::assert_err;
use crate::errors::CaptionError;
use crate::nn::CellType;

#[test]
fn test_cell_type_parse() {
    assert_eq!("rnn".parse::<CellType>().unwrap(), CellType::Rnn);
    assert_eq!("lstm".parse::<CellType>().unwrap(), CellType::Lstm);

    let result = "gru".parse::<CellType>();
    assert_err!(result, CaptionError::InvalidCellType("gru"));
    // 区分大小写
    let result = "RNN".parse::<CellType>();
    assert_err!(result, CaptionError::InvalidCellType("RNN"));
}

#[test]
fn test_cell_type_display_round_trip() {
    for cell_type in [CellType::Rnn, CellType::Lstm] {
        assert_eq!(cell_type.to_string().parse::<CellType>().unwrap(), cell_type);
    }
    assert_eq!(CellType::default(), CellType::Rnn);
}

#[test]
fn test_cell_type_gate_multiplier() {
    assert_eq!(CellType::Rnn.gate_multiplier(), 1);
    assert_eq!(CellType::Lstm.gate_multiplier(), 4);
}
