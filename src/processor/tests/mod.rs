//! Tests for the single-file pipeline


/// Two channels (date and pressure), three records, no FORMAT key
pub const MINIMAL_FILE: &str = r#"*2020/01/16 08:00:00.00
*IOS HEADER VERSION 2.0      2016/04/28 2016/06/13 IVF16

*FILE
    START TIME          : UTC 2020/01/15 00:00:00.000
    NUMBER OF RECORDS   : 3
    NUMBER OF CHANNELS  : 2

    $TABLE: CHANNELS
    ! No Name        Units
    !--- ----------  -------
       1 Date        n/a
       2 Pressure    decibar
    $END
    $TABLE: CHANNEL DETAIL
    ! No  Pad   Start  Width  Format      Type  Decimal_Places
    !---  ----  -----  -----  ----------  ----  --------------
       1  ' '   ' '       11  YYYY/MM/DD  D     ' '
       2  -99   ' '        7  F           R4      1
    $END

*END OF HEADER
 2020/01/15    1.0
 2020/01/15    2.0
 2020/01/15    3.0
"#;

/// The minimal file with a different start time
pub fn minimal_with_start(start: &str) -> String {
    MINIMAL_FILE.replace("UTC 2020/01/15 00:00:00.000", start)
}
