//! Test fixtures shared by the header, data and processor tests

mod section_tree_tests;
mod tokenizer_tests;

/// A small but complete CTD file: three channels, three records, no FORMAT key
pub const SAMPLE_CTD: &str = r#"*2019/07/02 09:40:28.93
*IOS HEADER VERSION 2.0      2016/04/28 2016/06/13 IVF16

*FILE
    START TIME          : UTC 2019/06/20 18:26:13.000
    NUMBER OF RECORDS   : 3
    DATA DESCRIPTION    : Bottle:Rosette:Up:Stop + CTD:Down
    FILE TYPE           : ASCII
    NUMBER OF CHANNELS  : 3

    $TABLE: CHANNELS
    ! No Name                   Units          Minimum        Maximum
    !--- ---------------------- -------------- -------------- --------------
       1 Pressure               decibar        1              3
       2 Temperature:Primary    'deg C (ITS90)' 9.1           9.3
       3 Salinity:T0:C0         PSS-78         28.1           30.0
    $END
    $TABLE: CHANNEL DETAIL
    ! No  Pad   Start  Width  Format  Type  Decimal_Places
    !---  ----  -----  -----  ------  ----  --------------
       1  -99   ' '        7  F       R4      1
       2  -99   ' '       10  F       R4      4
       3  -99   ' '       10  F       R4      4
    $END

*ADMINISTRATION
    MISSION             : 2019-001
    AGENCY              : IOS, Ocean Sciences Division, Sidney, B.C.
    SCIENTIST           : Chandler P.

*LOCATION
    STATION             : P4
    LATITUDE            :  48  39.00000 N  ! (deg min)
    LONGITUDE           : 126  40.00000 W  ! (deg min)

*INSTRUMENT
    TYPE                : Sea-Bird CTD
    MODEL               : SBE-911plus
    SERIAL NUMBER       : 0724

*COMMENTS
    Cast taken in calm seas.
    $ values checked against bottle samples
    Downcast only.

*END OF HEADER
    1.0    9.1234   28.1000
    2.0    9.2000   29.0000
    3.0    9.3000   30.0000
"#;

pub fn sample_lines() -> Vec<String> {
    lines_of(SAMPLE_CTD)
}

pub fn lines_of(text: &str) -> Vec<String> {
    text.lines().map(|l| l.to_string()).collect()
}
