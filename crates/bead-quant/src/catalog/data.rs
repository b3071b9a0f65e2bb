//! Built-in bead color table.
//!
//! Ordered by family, then by code. Order matters: static palettes take a
//! prefix of this table, so families near the end are the first to become
//! unreachable when the catalog exceeds the palette ceiling.

pub(crate) static BUILTIN: &[(&str, [u8; 3])] = &[
    // Yellows and oranges
    ("A01", [255, 249, 196]),
    ("A02", [255, 246, 167]),
    ("A03", [255, 243, 138]),
    ("A04", [255, 240, 111]),
    ("A05", [255, 238, 90]),
    ("A06", [255, 236, 68]),
    ("A07", [255, 231, 58]),
    ("A08", [254, 224, 55]),
    ("A09", [253, 217, 53]),
    ("A10", [254, 208, 38]),
    ("A11", [254, 200, 21]),
    ("A12", [255, 192, 6]),
    ("A13", [255, 187, 4]),
    ("A14", [255, 182, 1]),
    ("A15", [255, 174, 0]),
    ("A16", [255, 164, 0]),
    ("A17", [255, 154, 0]),
    ("A18", [254, 148, 0]),
    ("A19", [252, 144, 0]),
    ("A20", [251, 139, 0]),
    ("A21", [249, 133, 0]),
    ("A22", [246, 128, 0]),
    ("A23", [244, 122, 0]),
    ("A24", [242, 116, 0]),
    ("A25", [240, 110, 0]),
    ("A26", [237, 101, 0]),
    ("A27", [233, 91, 0]),
    ("A28", [230, 81, 0]),
    // Greens
    ("B01", [241, 248, 233]),
    ("B02", [234, 244, 222]),
    ("B03", [227, 241, 212]),
    ("B04", [221, 237, 201]),
    ("B05", [207, 230, 179]),
    ("B06", [192, 222, 156]),
    ("B07", [177, 215, 134]),
    ("B08", [165, 208, 115]),
    ("B09", [154, 203, 97]),
    ("B10", [142, 197, 79]),
    ("B11", [136, 191, 72]),
    ("B12", [131, 186, 70]),
    ("B13", [126, 181, 67]),
    ("B14", [115, 178, 69]),
    ("B15", [99, 177, 73]),
    ("B16", [84, 176, 78]),
    ("B17", [73, 170, 77]),
    ("B18", [66, 159, 70]),
    ("B19", [60, 148, 64]),
    ("B20", [55, 140, 59]),
    ("B21", [51, 134, 55]),
    ("B22", [48, 129, 52]),
    ("B23", [44, 122, 48]),
    ("B24", [38, 112, 42]),
    ("B25", [32, 102, 37]),
    ("B26", [25, 95, 36]),
    ("B27", [17, 98, 55]),
    ("B28", [8, 102, 75]),
    ("B29", [0, 104, 91]),
    ("B30", [0, 95, 82]),
    ("B31", [0, 86, 73]),
    ("B32", [0, 77, 64]),
    // Blues
    ("C01", [227, 242, 253]),
    ("C02", [212, 238, 253]),
    ("C03", [196, 234, 252]),
    ("C04", [181, 229, 252]),
    ("C05", [164, 224, 251]),
    ("C06", [148, 219, 251]),
    ("C07", [132, 213, 250]),
    ("C08", [116, 208, 249]),
    ("C09", [100, 202, 248]),
    ("C10", [84, 197, 247]),
    ("C11", [62, 189, 246]),
    ("C12", [37, 181, 245]),
    ("C13", [13, 172, 244]),
    ("C14", [9, 165, 244]),
    ("C15", [18, 159, 243]),
    ("C16", [28, 153, 243]),
    ("C17", [32, 145, 238]),
    ("C18", [29, 135, 227]),
    ("C19", [27, 124, 216]),
    ("C20", [24, 116, 208]),
    ("C21", [23, 110, 202]),
    ("C22", [22, 105, 196]),
    ("C23", [20, 98, 189]),
    ("C24", [18, 88, 179]),
    ("C25", [15, 79, 169]),
    ("C26", [14, 69, 159]),
    ("C27", [18, 57, 147]),
    ("C28", [22, 45, 136]),
    ("C29", [26, 35, 124]),
    ("C30", [21, 30, 104]),
    ("C31", [16, 25, 84]),
    ("C32", [11, 20, 64]),
    // Purples
    ("D01", [243, 229, 245]),
    ("D02", [237, 216, 240]),
    ("D03", [231, 203, 236]),
    ("D04", [225, 190, 231]),
    ("D05", [219, 176, 226]),
    ("D06", [212, 161, 221]),
    ("D07", [206, 147, 216]),
    ("D08", [199, 133, 211]),
    ("D09", [193, 118, 205]),
    ("D10", [186, 104, 200]),
    ("D11", [176, 82, 192]),
    ("D12", [166, 61, 184]),
    ("D13", [156, 39, 176]),
    ("D14", [151, 38, 174]),
    ("D15", [147, 37, 172]),
    ("D16", [142, 36, 170]),
    ("D17", [136, 34, 167]),
    ("D18", [129, 33, 165]),
    ("D19", [123, 31, 162]),
    ("D20", [117, 30, 159]),
    ("D21", [112, 28, 157]),
    ("D22", [106, 27, 154]),
    ("D23", [95, 25, 149]),
    ("D24", [85, 22, 145]),
    ("D25", [74, 20, 140]),
    ("D26", [66, 22, 142]),
    ("D27", [57, 25, 144]),
    ("D28", [49, 27, 146]),
    // Pinks
    ("E01", [252, 228, 236]),
    ("E02", [251, 213, 226]),
    ("E03", [249, 198, 216]),
    ("E04", [248, 183, 206]),
    ("E05", [246, 168, 194]),
    ("E06", [245, 152, 183]),
    ("E07", [243, 136, 172]),
    ("E08", [242, 120, 161]),
    ("E09", [240, 103, 150]),
    ("E10", [239, 90, 140]),
    ("E11", [238, 78, 132]),
    ("E12", [236, 65, 123]),
    ("E13", [235, 53, 115]),
    ("E14", [234, 41, 106]),
    ("E15", [232, 30, 99]),
    ("E16", [226, 29, 98]),
    ("E17", [220, 28, 97]),
    ("E18", [213, 27, 95]),
    ("E19", [205, 26, 94]),
    ("E20", [198, 24, 92]),
    ("E21", [190, 23, 90]),
    ("E22", [182, 22, 89]),
    ("E23", [175, 20, 87]),
    ("E24", [163, 18, 85]),
    ("E25", [149, 16, 82]),
    ("E26", [136, 14, 79]),
    // Reds
    ("F01", [255, 205, 210]),
    ("F02", [249, 187, 190]),
    ("F03", [243, 168, 170]),
    ("F04", [238, 151, 151]),
    ("F05", [235, 137, 137]),
    ("F06", [231, 123, 123]),
    ("F07", [231, 110, 109]),
    ("F08", [234, 98, 97]),
    ("F09", [238, 87, 84]),
    ("F10", [240, 79, 74]),
    ("F11", [242, 73, 64]),
    ("F12", [244, 68, 55]),
    ("F13", [239, 64, 54]),
    ("F14", [234, 60, 53]),
    ("F15", [228, 57, 53]),
    ("F16", [222, 53, 51]),
    ("F17", [215, 49, 48]),
    ("F18", [209, 46, 46]),
    ("F19", [205, 44, 44]),
    ("F20", [200, 41, 41]),
    ("F21", [195, 38, 38]),
    ("F22", [190, 33, 33]),
    ("F23", [184, 29, 29]),
    ("F24", [167, 20, 20]),
    ("F25", [147, 10, 10]),
    ("F26", [127, 0, 0]),
    // Browns and skin tones
    ("G01", [251, 233, 231]),
    ("G02", [249, 225, 217]),
    ("G03", [247, 217, 202]),
    ("G04", [244, 209, 188]),
    ("G05", [241, 200, 174]),
    ("G06", [237, 192, 160]),
    ("G07", [228, 180, 144]),
    ("G08", [219, 168, 128]),
    ("G09", [212, 157, 114]),
    ("G10", [205, 148, 101]),
    ("G11", [198, 139, 89]),
    ("G12", [183, 138, 104]),
    ("G13", [168, 137, 119]),
    ("G14", [157, 131, 121]),
    ("G15", [149, 120, 110]),
    ("G16", [141, 110, 99]),
    ("G17", [133, 100, 88]),
    ("G18", [125, 90, 77]),
    ("G19", [119, 83, 71]),
    ("G20", [114, 80, 68]),
    ("G21", [109, 76, 65]),
    ("G22", [103, 71, 61]),
    ("G23", [96, 66, 57]),
    ("G24", [87, 59, 51]),
    ("G25", [74, 49, 43]),
    ("G26", [62, 39, 35]),
    // Whites, greys and black
    ("H01", [255, 255, 255]),
    ("H02", [250, 250, 245]),
    ("H03", [245, 240, 230]),
    ("H04", [238, 238, 238]),
    ("H05", [224, 224, 224]),
    ("H06", [210, 210, 210]),
    ("H07", [189, 189, 189]),
    ("H08", [170, 170, 170]),
    ("H09", [158, 158, 158]),
    ("H10", [140, 140, 140]),
    ("H11", [117, 117, 117]),
    ("H12", [97, 97, 97]),
    ("H13", [80, 80, 80]),
    ("H14", [66, 66, 66]),
    ("H15", [50, 50, 50]),
    ("H16", [33, 33, 33]),
    ("H17", [0, 0, 0]),
    ("H18", [236, 239, 241]),
    ("H19", [207, 216, 220]),
    ("H20", [144, 164, 174]),
    ("H21", [96, 125, 139]),
    ("H22", [69, 90, 100]),
    // Muted tones
    ("M01", [176, 169, 144]),
    ("M02", [168, 164, 135]),
    ("M03", [161, 159, 127]),
    ("M04", [153, 152, 120]),
    ("M05", [145, 145, 114]),
    ("M06", [137, 139, 110]),
    ("M07", [130, 135, 112]),
    ("M08", [122, 132, 113]),
    ("M09", [117, 129, 110]),
    ("M10", [113, 126, 108]),
    ("M11", [119, 126, 117]),
    ("M12", [130, 126, 132]),
    ("M13", [136, 124, 140]),
    ("M14", [131, 116, 132]),
    ("M15", [125, 107, 125]),
    ("M16", [117, 100, 110]),
    ("M17", [110, 93, 96]),
    ("M18", [102, 94, 97]),
    ("M19", [96, 100, 106]),
    ("M20", [89, 100, 110]),
    ("M21", [81, 93, 103]),
    ("M22", [74, 85, 96]),
    // Pastels
    ("P01", [255, 240, 245]),
    ("P02", [255, 235, 237]),
    ("P03", [255, 231, 229]),
    ("P04", [251, 228, 229]),
    ("P05", [241, 229, 239]),
    ("P06", [231, 230, 249]),
    ("P07", [228, 239, 252]),
    ("P08", [226, 248, 254]),
    ("P09", [226, 255, 253]),
    ("P10", [232, 255, 247]),
    ("P11", [239, 255, 241]),
    ("P12", [245, 253, 229]),
    ("P13", [250, 252, 216]),
    ("P14", [255, 248, 203]),
    ("P15", [255, 240, 193]),
    ("P16", [255, 232, 183]),
    ("P17", [245, 219, 189]),
    ("P18", [230, 204, 203]),
    ("P19", [214, 192, 217]),
    ("P20", [199, 205, 222]),
    ("P21", [183, 218, 228]),
    ("P22", [180, 224, 222]),
    ("P23", [186, 225, 207]),
    ("P24", [193, 225, 193]),
    // Neons
    ("Q01", [255, 255, 0]),
    ("Q02", [216, 255, 0]),
    ("Q03", [125, 255, 11]),
    ("Q04", [39, 255, 53]),
    ("Q05", [0, 255, 137]),
    ("Q06", [0, 255, 235]),
    ("Q07", [19, 148, 255]),
    ("Q08", [91, 57, 255]),
    ("Q09", [198, 16, 254]),
    ("Q10", [250, 1, 255]),
    ("Q11", [255, 14, 180]),
    ("Q12", [255, 33, 102]),
    ("Q13", [255, 60, 45]),
    ("Q14", [255, 95, 31]),
];
